use dioxus::prelude::*;

/// Horizontal bar chart. Bar lengths are relative to the largest value;
/// an empty series shows `empty_message`.
#[component]
pub fn BarChart(
    points: Vec<(String, u64)>,
    #[props(default = "Sem dados para exibir".to_string())] empty_message: String,
) -> Element {
    rsx! {
        document::Link { rel: "stylesheet", href: asset!("./style.css") }
        BarList { points, empty_message }
    }
}

#[component]
pub fn BarList(points: Vec<(String, u64)>, empty_message: String) -> Element {
    if points.is_empty() {
        return rsx! {
            p { class: "bar-chart-empty", "{empty_message}" }
        };
    }

    let max = points.iter().map(|(_, value)| *value).max().unwrap_or(0);
    rsx! {
        div { class: "bar-chart", role: "list",
            for (label, value) in points {
                BarRow {
                    key: "{label}",
                    label: label.clone(),
                    value,
                    width: relative_width(value, max),
                }
            }
        }
    }
}

fn relative_width(value: u64, max: u64) -> f64 {
    if max == 0 {
        0.0
    } else {
        value.min(max) as f64 / max as f64 * 100.0
    }
}

#[component]
fn BarRow(label: String, value: u64, width: f64) -> Element {
    rsx! {
        div { class: "bar-chart-row", role: "listitem",
            span { class: "bar-chart-label", "{label}" }
            div { class: "bar-chart-track",
                div {
                    class: "bar-chart-fill",
                    style: "width: {width:.1}%",
                }
            }
            span { class: "bar-chart-value", "{value}" }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn largest_value_fills_the_track() {
        let html = dioxus_ssr::render_element(rsx! {
            BarList {
                points: vec![("Recife".to_string(), 8), ("Olinda".to_string(), 2)],
                empty_message: "vazio".to_string(),
            }
        });
        assert!(html.contains("width: 100.0%"));
        assert!(html.contains("width: 25.0%"));
        assert!(html.contains("Olinda"));
    }

    #[test]
    fn all_zero_series_draws_empty_bars() {
        assert_eq!(relative_width(0, 0), 0.0);
        assert_eq!(relative_width(3, 0), 0.0);
        let html = dioxus_ssr::render_element(rsx! {
            BarList {
                points: vec![("Recife".to_string(), 0)],
                empty_message: "vazio".to_string(),
            }
        });
        assert!(html.contains("width: 0.0%"));
    }

    #[test]
    fn empty_series_shows_message() {
        let html = dioxus_ssr::render_element(rsx! {
            BarList { points: vec![], empty_message: "Sem dados".to_string() }
        });
        assert!(html.contains("Sem dados"));
        assert!(!html.contains("bar-chart-row"));
    }
}
