//! Ordered registry of tour steps.

use super::step::StepDescriptor;
use crate::controller::TourError;
use stillwater::validation::Validation;
use stillwater::NonEmptyVec;
use thiserror::Error;

/// Problems found when validating a registry before a tour run.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum RegistryViolation {
    #[error("the tour has no steps")]
    Empty,

    #[error("step {index} has a blank selector")]
    BlankSelector { index: usize },

    #[error("step {index} observes a blank selector")]
    BlankObserve { index: usize },
}

/// Ordered sequence of step descriptors.
///
/// Order defines tour progression. The length is fixed once built; a
/// descriptor can be swapped for another with [`StepRegistry::replace`]
/// between transitions, but steps are never inserted or removed.
pub struct StepRegistry<R, N> {
    steps: Vec<StepDescriptor<R, N>>,
}

impl<R, N> StepRegistry<R, N> {
    pub fn new(steps: Vec<StepDescriptor<R, N>>) -> Self {
        Self { steps }
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&StepDescriptor<R, N>> {
        self.steps.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &StepDescriptor<R, N>> {
        self.steps.iter()
    }

    /// Swap the descriptor at `index`, returning the previous one.
    pub fn replace(
        &mut self,
        index: usize,
        step: StepDescriptor<R, N>,
    ) -> Result<StepDescriptor<R, N>, TourError> {
        let len = self.steps.len();
        let slot = self
            .steps
            .get_mut(index)
            .ok_or(TourError::IndexOutOfRange { index, len })?;
        Ok(std::mem::replace(slot, step))
    }

    /// Validate every step, accumulating ALL violations.
    pub fn validate(&self) -> Validation<(), NonEmptyVec<RegistryViolation>> {
        if self.steps.is_empty() {
            return Validation::fail(RegistryViolation::Empty);
        }

        let mut checks: Vec<Validation<(), NonEmptyVec<RegistryViolation>>> = Vec::new();

        for (index, step) in self.steps.iter().enumerate() {
            checks.push(if step.selector.trim().is_empty() {
                Validation::fail(RegistryViolation::BlankSelector { index })
            } else {
                Validation::success(())
            });

            if let Some(observe) = &step.observe {
                checks.push(if observe.trim().is_empty() {
                    Validation::fail(RegistryViolation::BlankObserve { index })
                } else {
                    Validation::success(())
                });
            }
        }

        Validation::all_vec(checks).map(|_| ())
    }

    /// Validate, converting the accumulated violations into a [`TourError`].
    pub fn ensure_valid(&self) -> Result<(), TourError> {
        match self.validate() {
            Validation::Success(()) => Ok(()),
            Validation::Failure(violations) => Err(TourError::InvalidRegistry { violations }),
        }
    }
}

impl<R, N> From<Vec<StepDescriptor<R, N>>> for StepRegistry<R, N> {
    fn from(steps: Vec<StepDescriptor<R, N>>) -> Self {
        Self::new(steps)
    }
}

impl<R: Clone, N> Clone for StepRegistry<R, N> {
    fn clone(&self) -> Self {
        Self {
            steps: self.steps.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Content;

    fn step(selector: &str) -> StepDescriptor<String, ()> {
        StepDescriptor::new(selector, Content::Static(selector.to_string()))
    }

    #[test]
    fn empty_registry_is_invalid() {
        let registry: StepRegistry<String, ()> = StepRegistry::new(Vec::new());

        match registry.validate() {
            Validation::Failure(errors) => {
                assert_eq!(errors.len(), 1);
                assert!(errors.iter().any(|e| *e == RegistryViolation::Empty));
            }
            Validation::Success(_) => panic!("Expected failure for empty registry"),
        }
    }

    #[test]
    fn validation_accumulates_all_violations() {
        let registry = StepRegistry::new(vec![
            step("[data-tut=\"iso\"]"),
            step("  "),
            step("[data-tut=\"state\"]").observing(""),
            step(""),
        ]);

        match registry.validate() {
            Validation::Failure(errors) => {
                assert_eq!(errors.len(), 3);
                assert!(errors
                    .iter()
                    .any(|e| *e == RegistryViolation::BlankSelector { index: 1 }));
                assert!(errors
                    .iter()
                    .any(|e| *e == RegistryViolation::BlankObserve { index: 2 }));
                assert!(errors
                    .iter()
                    .any(|e| *e == RegistryViolation::BlankSelector { index: 3 }));
            }
            Validation::Success(_) => panic!("Expected failures, got success"),
        }
    }

    #[test]
    fn well_formed_registry_validates() {
        let registry = StepRegistry::new(vec![
            step("[data-tut=\"iso\"]"),
            step("[data-tut=\"logo\"]").observing("[data-tut=\"logo--observe\"]"),
        ]);

        assert!(registry.validate().is_success());
        assert!(registry.ensure_valid().is_ok());
    }

    #[test]
    fn replace_swaps_in_place() {
        let mut registry = StepRegistry::new(vec![step("a"), step("b")]);

        let old = registry.replace(1, step("c")).unwrap();

        assert_eq!(old.selector, "b");
        assert_eq!(registry.len(), 2);
        assert_eq!(registry.get(1).map(|s| s.selector.as_str()), Some("c"));
    }

    #[test]
    fn replace_rejects_out_of_range() {
        let mut registry = StepRegistry::new(vec![step("a")]);

        let result = registry.replace(3, step("z"));

        assert!(matches!(
            result,
            Err(TourError::IndexOutOfRange { index: 3, len: 1 })
        ));
        assert_eq!(registry.get(0).map(|s| s.selector.as_str()), Some("a"));
    }
}
