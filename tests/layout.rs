//! Composition layouts and inline extraction through the public API.

use fbdraw::compose::{CompositionConfig, SkipReason};
use fbdraw::extract::{InlineExtractor, Segment};
use fbdraw::{Composer, CompositionEntry, Diagram, DiagramBuilder, GeneratorError, Layout, PresetArg, PresetRegistry};

fn registry() -> PresetRegistry {
    PresetRegistry::new()
        .with("dot", |id: &str, _: &[PresetArg]| -> Result<Diagram, GeneratorError> {
            Ok(DiagramBuilder::with_size(id, 200.0, 100.0)
                .add_point("c", 100.0, 50.0, None)
                .build())
        })
        .with("broken", |_: &str, _: &[PresetArg]| -> Result<Diagram, GeneratorError> {
            Err(GeneratorError::Failed("out of paper".into()))
        })
}

fn entries(names: &[&str]) -> Vec<CompositionEntry> {
    names.iter().map(|n| CompositionEntry::new(*n)).collect()
}

#[test]
fn grid_two_by_two_is_row_major() {
    let registry = registry();
    let composition = Composer::new(&registry).compose("g", &Layout::Grid { columns: 2 }, &entries(&["dot"; 4]));
    assert_eq!(composition.cells(), [(0, 0), (1, 0), (0, 1), (1, 1)]);
    let origins: Vec<(f64, f64)> = composition.placements.iter().map(|p| (p.x, p.y)).collect();
    assert_eq!(origins, [(50.0, 50.0), (500.0, 50.0), (50.0, 500.0), (500.0, 500.0)]);
}

#[test]
fn skipped_entries_are_reported_with_their_reason() {
    let registry = registry();
    let composition = Composer::new(&registry).series("s", &entries(&["dot", "missing", "broken", "dot"]));
    assert_eq!(composition.placements.len(), 2);
    let reasons: Vec<_> = composition.skipped.iter().map(|s| (s.index, s.reason.clone())).collect();
    assert_eq!(
        reasons,
        [
            (1, SkipReason::UnknownPreset),
            (2, SkipReason::Generator(GeneratorError::Failed("out of paper".into())))
        ]
    );
    // the second dot follows directly after the first
    assert_eq!(composition.placements[1].x, 50.0 + 200.0 + 50.0);
}

#[test]
fn custom_spacing() {
    let registry = registry();
    let config = CompositionConfig {
        spacing: 10.0,
        ..CompositionConfig::default()
    };
    let composition = Composer::new(&registry)
        .with_config(config)
        .parallel("p", &entries(&["dot", "dot"]));
    let ys: Vec<f64> = composition.placements.iter().map(|p| p.y).collect();
    assert_eq!(ys, [50.0, 160.0]);
}

#[test]
fn composed_markup_nests_children_once() {
    let registry = registry();
    let composition = Composer::new(&registry).comparison("c", &entries(&["dot", "dot"]), Some("Dots"));
    let svg = composition.diagram.markup();
    assert_eq!(svg.matches("<svg").count(), 1);
    assert_eq!(svg.matches(r#"class="fbd-composed""#).count(), 2);
    assert!(svg.contains(r#"<g id="c-0" class="fbd-composed" transform="translate(50, 90)">"#));
}

#[test]
fn extract_then_expand_restores_the_text() {
    let registry = registry();
    let extractor = InlineExtractor::new(&registry);
    let text = "Given ##PRESET:dot## and ##GRID:2:dot,dot## and ##PRESET:nope##, explain.";
    let extracted = extractor.extract(text);
    assert_eq!(extracted.diagrams.len(), 2);
    assert_eq!(
        extracted.clean_text,
        "Given __FBD_0__ and __FBD_1__ and ##PRESET:nope##, explain."
    );

    let mut rebuilt = String::new();
    for segment in extracted.segments() {
        match segment {
            Segment::Text(t) => rebuilt.push_str(t),
            Segment::Diagram(d) => {
                let index = extracted.diagrams.iter().position(|x| x.id == d.id).unwrap();
                rebuilt.push_str(&format!("##{}##", original_notation(index)));
            }
        }
    }
    assert_eq!(rebuilt, text);
}

fn original_notation(index: usize) -> &'static str {
    ["PRESET:dot", "GRID:2:dot,dot"][index]
}

#[test]
fn rendered_inline_text_keeps_prose() {
    let registry = registry();
    let html = InlineExtractor::new(&registry).render("A ##PRESET:dot## B");
    assert!(html.starts_with("A <svg "));
    assert!(html.ends_with("</svg>\n B"));
    assert!(html.contains(r#"id="inline-fbd-0""#));
}

#[test]
fn literal_placeholder_in_prose_survives_expansion() {
    let registry = registry();
    let extracted = InlineExtractor::new(&registry).extract("Token __FBD_5__ is prose; ##PRESET:dot## is not.");
    assert_eq!(extracted.diagrams.len(), 1);
    assert_eq!(extracted.clean_text, "Token __FBD_5__ is prose; __FBD_0__ is not.");

    let segments = extracted.segments();
    assert_eq!(segments.len(), 3);
    assert_eq!(segments[0], Segment::Text("Token __FBD_5__ is prose; "));
    assert!(matches!(segments[1], Segment::Diagram(d) if d.id == "inline-fbd-0"));
    assert_eq!(segments[2], Segment::Text(" is not."));

    let rendered = extracted.render();
    assert!(rendered.starts_with("Token __FBD_5__ is prose; <svg "));
}
