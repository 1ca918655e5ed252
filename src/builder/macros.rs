//! Macros for ergonomic step declaration.

/// Declare a list of steps with static content.
///
/// Each entry is `selector => content`, optionally followed by `; position`.
/// Hooks, styles and observers are added with [`StepBuilder`](crate::builder::StepBuilder)
/// or the `with_*` methods on the resulting descriptors.
///
/// # Example
///
/// ```
/// use tourguide::core::{Position, StepDescriptor};
/// use tourguide::tour_steps;
///
/// let steps: Vec<StepDescriptor<String, ()>> = tour_steps![
///     "[data-tut=\"iso\"]" => "The name of the tour",
///     "[data-tut=\"position\"]" => "Positioned on the left"; Position::Left,
/// ];
///
/// assert_eq!(steps.len(), 2);
/// assert_eq!(steps[1].position, Some(Position::Left));
/// ```
#[macro_export]
macro_rules! tour_steps {
    (
        $(
            $selector:expr => $content:expr $(; $position:expr)?
        ),* $(,)?
    ) => {
        vec![
            $(
                {
                    let step = $crate::core::StepDescriptor::new(
                        $selector,
                        $crate::core::Content::Static(::std::convert::Into::into($content)),
                    );
                    $(let step = step.with_position($position);)?
                    step
                }
            ),*
        ]
    };
}

#[cfg(test)]
mod tests {
    use crate::core::{Position, StepDescriptor};

    #[test]
    fn tour_steps_macro_builds_descriptors() {
        let steps: Vec<StepDescriptor<String, ()>> = tour_steps![
            "[data-tut=\"logo\"]" => "Our cool bus",
            "[data-tut=\"scroll\"]" => "Scroll to me"; Position::Top,
        ];

        assert_eq!(steps.len(), 2);
        assert_eq!(steps[0].selector, "[data-tut=\"logo\"]");
        assert_eq!(steps[0].position, None);
        assert_eq!(steps[1].position, Some(Position::Top));
        assert!(!steps[1].content.is_computed());
    }

    #[test]
    fn tour_steps_macro_accepts_empty_list() {
        let steps: Vec<StepDescriptor<String, ()>> = tour_steps![];
        assert!(steps.is_empty());
    }
}
