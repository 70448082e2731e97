//! Bar visualizations for sentiment and difference values.

use hr_core::sentiment::{difference_bar_width, difference_percent, Affect};

use crate::dom::{Document, NodeId};

pub const SENTIMENT_GRAPH: &str = "sentiment-graph";
pub const DIFFERENCE_GRAPH: &str = "difference-graph";

fn width_style(percent: f64) -> String {
    format!("width: {}%", percent)
}

/// Two opposite bars around a midpoint; exactly one is `active`.
///
/// Zero scores light up the positive side at zero width.
pub fn sentiment_graph(doc: &mut Document, score: f64) -> NodeId {
    let affect = Affect::from_score(score);
    let graph = doc.create_element("div");
    doc.add_class(graph, SENTIMENT_GRAPH);

    let track = doc.append_element(graph, "div", &["bar-track"]);
    let negative = doc.append_element(track, "div", &["bar", "negative"]);
    doc.append_element(track, "div", &["midpoint"]);
    let positive = doc.append_element(track, "div", &["bar", "positive"]);

    let active = match affect {
        Affect::Negative(_) => negative,
        Affect::Positive(_) | Affect::Neutral => positive,
    };
    doc.add_class(active, "active");
    doc.set_attr(active, "style", &width_style(f64::from(affect.certainty())));

    let label = doc.append_element(graph, "p", &["affect-label"]);
    doc.set_text(label, &affect.to_string());
    graph
}

/// A single bar on a half-width scale, since a match spans [-1, 1].
pub fn difference_graph(doc: &mut Document, sentiment_match: f64) -> NodeId {
    let graph = doc.create_element("div");
    doc.add_class(graph, DIFFERENCE_GRAPH);

    let track = doc.append_element(graph, "div", &["difference-track"]);
    let bar = doc.append_element(track, "div", &["bar", "difference"]);
    doc.set_attr(bar, "style", &width_style(difference_bar_width(sentiment_match)));

    let label = doc.append_element(graph, "p", &["difference-label"]);
    doc.set_text(label, &format!("Difference: {}", difference_percent(sentiment_match)));
    graph
}
