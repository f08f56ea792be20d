use dioxus::prelude::*;

/// Progress header for multi-step forms. `current` is zero-based; steps
/// before it render as done.
#[component]
pub fn Stepper(steps: Vec<String>, current: usize) -> Element {
    rsx! {
        document::Link { rel: "stylesheet", href: asset!("./style.css") }
        StepperTrack { steps, current }
    }
}

#[component]
pub fn StepperTrack(steps: Vec<String>, current: usize) -> Element {
    rsx! {
        ol { class: "stepper",
            for (index, label) in steps.iter().enumerate() {
                StepperStep {
                    key: "{index}",
                    index,
                    label: label.clone(),
                    state: step_state(index, current),
                }
            }
        }
    }
}

fn step_state(index: usize, current: usize) -> &'static str {
    match index.cmp(&current) {
        std::cmp::Ordering::Less => "done",
        std::cmp::Ordering::Equal => "active",
        std::cmp::Ordering::Greater => "pending",
    }
}

#[component]
fn StepperStep(index: usize, label: String, state: &'static str) -> Element {
    let number = index + 1;
    rsx! {
        li {
            class: "stepper-step",
            "data-state": state,
            "aria-current": if state == "active" { "step" } else { "false" },
            span { class: "stepper-index", "{number}" }
            span { class: "stepper-label", "{label}" }
        }
    }
}
