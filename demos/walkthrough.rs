//! The bus tour, played against an in-memory page.
//!
//! Run with `cargo run --example walkthrough`.

use tourguide::builder::{StepBuilder, TourBuilder};
use tourguide::controller::{Frame, NavHandle, Placement, Renderer, Tour};
use tourguide::core::{Position, StepDescriptor, StyleOverrides};
use tourguide::page::memory::{MemoryPage, NodeId};
use tourguide::page::{Page, Rect};
use tourguide::{tour_steps, BuildError};

fn tut(name: &str) -> String {
    format!("[data-tut=\"reactour__{name}\"]")
}

/// Prints each frame the way the stock helper lays it out.
struct ConsoleHelper;

impl Renderer<String, NodeId> for ConsoleHelper {
    fn render(&mut self, frame: &Frame<String, NodeId>, _nav: &NavHandle) {
        let place = match frame.placement {
            Placement::Anchored { rect, position } => {
                format!("{position:?} of ({:.0}, {:.0})", rect.x, rect.y)
            }
            Placement::Centered => "centred".to_string(),
        };
        let refresh = if frame.refresh { " (refreshed)" } else { "" };
        println!(
            "[{}/{}] {place}{refresh}: {}",
            frame.index + 1,
            frame.total,
            frame.content
        );
        if let Some(style) = &frame.style {
            for (key, value) in style.iter() {
                println!("        style {key} = {value}");
            }
        }
    }

    fn clear(&mut self) {
        println!("(overlay removed)");
    }
}

/// Compact helper with a step counter and one button per step.
struct CustomHelper;

impl Renderer<String, NodeId> for CustomHelper {
    fn render(&mut self, frame: &Frame<String, NodeId>, _nav: &NavHandle) {
        let buttons: Vec<String> = (0..frame.total)
            .map(|i| {
                if i == frame.index {
                    format!("[{}]", i + 1)
                } else {
                    format!(" {} ", i + 1)
                }
            })
            .collect();
        println!("Step: {} | x  {}", frame.index + 1, buttons.join(""));
        println!("    {}", frame.content);
    }
}

/// Nodes the demo's hooks toggle on the page.
#[derive(Clone, Copy)]
struct Toggles {
    dropdown: NodeId,
    building: NodeId,
}

fn demo_page() -> (MemoryPage, Toggles) {
    let page = MemoryPage::new();
    let names = [
        "iso",
        "logo",
        "copy",
        "style",
        "goTo",
        "position",
        "scroll",
    ];
    for (i, name) in names.iter().enumerate() {
        page.insert(tut(name), Rect::new(40.0, 120.0 * i as f64, 320.0, 60.0));
    }
    let fold = page.insert("footer", Rect::new(0.0, 2400.0, 1280.0, 400.0));
    page.insert_child(fold, tut("scroll--hidden"), Rect::new(900.0, 2600.0, 120.0, 40.0));
    let dropdown = page.insert("menu", Rect::new(40.0, 840.0, 320.0, 200.0));
    page.insert_child(dropdown, tut("action"), Rect::new(40.0, 860.0, 320.0, 60.0));
    page.detach(dropdown);
    page.insert(tut("state"), Rect::new(40.0, 1200.0, 200.0, 40.0));
    let observed = page.insert(tut("state--observe"), Rect::new(40.0, 1260.0, 600.0, 80.0));
    let building = page.insert_child(observed, tut("building"), Rect::new(40.0, 1340.0, 600.0, 300.0));
    page.detach(building);
    (
        page,
        Toggles {
            dropdown,
            building,
        },
    )
}

fn demo_steps(page: &MemoryPage, toggles: Toggles) -> Result<Vec<StepDescriptor<String, NodeId>>, BuildError> {
    let mut steps: Vec<StepDescriptor<String, NodeId>> = tour_steps![
        tut("iso") => "Ok, let's start with the name of the Tour that is about to begin.",
        tut("logo") => "And this is our cool bus...",
        tut("copy") => "Keep in mind that you could try and test everything during the Tour.",
    ];

    steps.push(
        StepBuilder::<String, NodeId>::new(tut("style"))
            .content("The tourist guide could be dressed in any way.".to_string())
            .style(
                StyleOverrides::new()
                    .set("backgroundColor", "black")
                    .set("color", "white"),
            )
            .build()?,
    );
    steps.push(
        StepBuilder::<String, NodeId>::new(tut("goTo"))
            .computed(|ctx| {
                format!(
                    "If you wanna go anywhere, skipping places, it is absolutely possible. \
                     [Please go back to the bus] (step {} of {})",
                    ctx.index + 1,
                    ctx.total
                )
            })
            .build()?,
    );
    let sightseeing: Vec<StepDescriptor<String, NodeId>> = tour_steps![
        tut("position") => "The tourist guide could be positioned where you want."; Position::Left,
        tut("scroll") => "Probably you noted that the Tour scrolled directly to the desired place.",
        tut("scroll--hidden") => "Also when places are pretty hidden...",
    ];
    steps.extend(sightseeing);
    let (opener, closer) = (page.clone(), page.clone());
    steps.push(
        StepBuilder::<String, NodeId>::new(tut("action"))
            .content("As soon as you arrive on a step you can perform actions.".to_string())
            .pre_action(move |_| {
                opener.reattach(toggles.dropdown);
                println!("        [PRE-ACTION] dropdown opened before the step begins");
                Ok(())
            })
            .action(|_, _| {
                println!("        [ACTION] landed on the selector, content displayed");
                Ok(())
            })
            .post_action(move |_| {
                closer.detach(toggles.dropdown);
                println!("        [POST-ACTION] dropdown closed before moving on");
                Ok(())
            })
            .build()?,
    );

    let rewinder = page.clone();
    steps.push(
        StepBuilder::<String, NodeId>::new(tut("state"))
            .content("And the Tour could be observing changes to update the view.".to_string())
            .observe(tut("state--observe"))
            .action(|node, _| {
                println!("        focusing {node:?}");
                Ok(())
            })
            .rewind_action(move |_| {
                rewinder.detach(toggles.building);
                println!("        Timewarp in progress...");
                Ok(())
            })
            .build()?,
    );
    let aftermath: Vec<StepDescriptor<String, NodeId>> = tour_steps![
        tut("state") => "Whoops, we've made a change to the page's state. See what happens when you rewind this step.",
    ];
    steps.extend(aftermath);
    Ok(steps)
}

fn show_more(tour: &mut Tour<String, MemoryPage>, toggles: Toggles) {
    let page = tour.page();
    page.reattach(toggles.building);
    page.mutate(toggles.building);
    let report = tour.pump();
    println!("(page mutated, {} request(s) handled)", report.processed);
}

fn showing_more(tour: &Tour<String, MemoryPage>) -> bool {
    !tour.page().query_all(&tut("building")).is_empty()
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let (page, toggles) = demo_page();
    let steps = demo_steps(&page, toggles)?;

    let mut tour = TourBuilder::new()
        .page(page)
        .steps(steps)
        .renderer(ConsoleHelper)
        .on_after_open(|i| println!("(body scroll locked at step {})", i + 1))
        .on_before_close(|i| println!("(body scroll released at step {})", i + 1))
        .build()?;

    tour.open()?;
    for _ in 0..4 {
        tour.next()?;
    }

    // The "Please go back to the bus" button.
    tour.nav_handle().goto_step(1);
    tour.pump();
    tour.go_to(5)?;

    for _ in 0..4 {
        tour.next()?;
    }
    show_more(&mut tour, toggles);
    println!("showing more: {}", showing_more(&tour));
    tour.next()?;

    println!("(Enter pressed: custom helper)");
    tour.set_renderer(CustomHelper);
    tour.prev()?;
    println!("showing more: {}", showing_more(&tour));

    tour.close()?;
    println!("path taken: {:?}", tour.history().get_path());
    Ok(())
}
