//! Composition engine
//!
//! Runs several preset generators and arranges their diagrams side by side
//! (series), stacked (parallel), in a matrix (grid) or in labelled columns
//! (comparison). The result is a single [`Diagram`] whose background markup
//! holds the arranged children.
//!
//! Entries whose preset is unknown or whose generator fails are skipped and
//! listed in [`Composition::skipped`]; the rest of the layout is kept.

mod syntax;

pub use syntax::{Combination, PREFIXES, is_combination, parse_combination};

use crate::errors::{GeneratorError, NotationError};
use crate::log;
use crate::model::Diagram;
use crate::preset::{self, PresetArg, PresetRegistry};
use crate::render::svg::{Element, SvgWriter, fmt_num};
use crate::render::{self, strip_root};

/// One diagram to place: a preset name, its arguments, an optional caption
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CompositionEntry {
    pub preset: String,
    pub args: Vec<PresetArg>,
    pub label: Option<String>,
}

impl CompositionEntry {
    pub fn new(preset: impl Into<String>) -> Self {
        Self {
            preset: preset.into(),
            args: Vec::new(),
            label: None,
        }
    }

    pub fn with_args(mut self, args: Vec<PresetArg>) -> Self {
        self.args = args;
        self
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Caption text: the label, or the preset name
    pub fn caption(&self) -> &str {
        self.label.as_deref().unwrap_or(&self.preset)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Layout {
    Series,
    Parallel,
    Grid { columns: usize },
    Comparison { title: Option<String> },
}

/// Spacing and cell sizes
#[derive(Debug, Clone, PartialEq)]
pub struct CompositionConfig {
    /// Gap between neighbours in series, parallel and grid layouts
    pub spacing: f64,
    pub grid_cell_width: f64,
    pub grid_cell_height: f64,
    pub compare_cell_width: f64,
    pub compare_spacing: f64,
}

impl Default for CompositionConfig {
    fn default() -> Self {
        Self {
            spacing: 50.0,
            grid_cell_width: 400.0,
            grid_cell_height: 400.0,
            compare_cell_width: 350.0,
            compare_spacing: 100.0,
        }
    }
}

/// Where one child diagram ended up
#[derive(Debug, Clone, PartialEq)]
pub struct Placement {
    /// Position of the entry in the input list
    pub index: usize,
    pub preset: String,
    pub x: f64,
    pub y: f64,
    pub scale: f64,
    /// `(column, row)` of the cell the child occupies
    pub cell: (usize, usize),
}

#[derive(Debug, Clone, PartialEq)]
pub enum SkipReason {
    UnknownPreset,
    Generator(GeneratorError),
}

/// An entry left out of a composition
#[derive(Debug, Clone, PartialEq)]
pub struct SkippedEntry {
    pub index: usize,
    pub preset: String,
    pub reason: SkipReason,
}

/// A composed diagram with a record of how it was assembled
#[derive(Debug, Clone, PartialEq)]
pub struct Composition {
    pub diagram: Diagram,
    pub placements: Vec<Placement>,
    pub skipped: Vec<SkippedEntry>,
}

impl Composition {
    /// Cells actually occupied, in input order
    pub fn cells(&self) -> Vec<(usize, usize)> {
        self.placements.iter().map(|p| p.cell).collect()
    }
}

/// Arranges generated diagrams; borrows the same registry as the parser
#[derive(Debug, Clone)]
pub struct Composer<'r> {
    registry: &'r PresetRegistry,
    config: CompositionConfig,
}

impl Default for Composer<'static> {
    fn default() -> Self {
        Self::new(preset::builtin())
    }
}

/// Children generated so far plus the bookkeeping every layout shares
struct Assembly<'e> {
    id: String,
    entries: &'e [CompositionEntry],
    out: SvgWriter,
    placements: Vec<Placement>,
    skipped: Vec<SkippedEntry>,
}

impl<'e> Assembly<'e> {
    fn new(id: &str, entries: &'e [CompositionEntry]) -> Self {
        Self {
            id: id.to_string(),
            entries,
            out: SvgWriter::new(),
            placements: Vec::new(),
            skipped: Vec::new(),
        }
    }

    fn place(&mut self, index: usize, x: f64, y: f64, scale: f64, cell: (usize, usize)) {
        self.placements.push(Placement {
            index,
            preset: self.entries[index].preset.clone(),
            x,
            y,
            scale,
            cell,
        });
    }

    /// Child diagram markup inside a translated (and maybe scaled) group.
    /// The group takes the child's id so its scoped styles still apply.
    fn child(&mut self, child: &Diagram, x: f64, y: f64, scale: Option<f64>) {
        self.out.open(
            &Element::new("g")
                .attr("id", child.id.as_str())
                .attr("class", "fbd-composed")
                .attr("transform", format!("translate({}, {})", fmt_num(x), fmt_num(y))),
        );
        if let Some(scale) = scale {
            self.out.open(&Element::new("g").attr("transform", format!("scale({})", fmt_num(scale))));
        }
        self.out.raw(strip_root(&child.markup()));
        if scale.is_some() {
            self.out.close();
        }
        self.out.close();
    }

    fn finish(self, width: f64, height: f64) -> Composition {
        let mut diagram = Diagram::new(self.id, width, height);
        diagram.show_axes = Some(false);
        diagram.show_grid = Some(false);
        diagram.background_markup = Some(self.out.finish());
        diagram.rendered_markup = Some(render::render(&diagram));
        Composition {
            diagram,
            placements: self.placements,
            skipped: self.skipped,
        }
    }
}

impl<'r> Composer<'r> {
    pub fn new(registry: &'r PresetRegistry) -> Self {
        Self {
            registry,
            config: CompositionConfig::default(),
        }
    }

    pub fn with_config(mut self, config: CompositionConfig) -> Self {
        self.config = config;
        self
    }

    pub fn config(&self) -> &CompositionConfig {
        &self.config
    }

    fn generate(&self, assembly: &mut Assembly<'_>, index: usize) -> Option<Diagram> {
        let entry = &assembly.entries[index];
        let child_id = format!("{}-{}", assembly.id, index);
        let reason = match self.registry.generate(&entry.preset, &child_id, &entry.args) {
            Some(Ok(diagram)) => return Some(diagram),
            Some(Err(e)) => SkipReason::Generator(e),
            None => SkipReason::UnknownPreset,
        };
        log::warn!(index, preset = %entry.preset, reason = ?reason, "skipping composition entry");
        assembly.skipped.push(SkippedEntry {
            index,
            preset: entry.preset.clone(),
            reason,
        });
        None
    }

    pub fn compose(&self, id: &str, layout: &Layout, entries: &[CompositionEntry]) -> Composition {
        match layout {
            Layout::Series => self.series(id, entries),
            Layout::Parallel => self.parallel(id, entries),
            Layout::Grid { columns } => self.grid(id, entries, *columns),
            Layout::Comparison { title } => self.comparison(id, entries, title.as_deref()),
        }
    }

    /// Left to right, joined by connector arrows
    pub fn series(&self, id: &str, entries: &[CompositionEntry]) -> Composition {
        let spacing = self.config.spacing;
        let base_y = 200.0;
        let marker = format!("{id}-series-arrow");
        let mut asm = Assembly::new(id, entries);
        let mut x = 50.0;
        let mut max_height: f64 = 400.0;

        if entries.len() > 1 {
            asm.out.open(&Element::new("defs"));
            asm.out.open(
                &Element::new("marker")
                    .attr("id", marker.as_str())
                    .attr("markerWidth", 10.0)
                    .attr("markerHeight", 10.0)
                    .attr("refX", 9.0)
                    .attr("refY", 3.0)
                    .attr("orient", "auto"),
            );
            asm.out.leaf(&Element::new("polygon").attr("points", "0 0, 10 3, 0 6").attr("fill", "#666"));
            asm.out.close();
            asm.out.close();
        }

        for index in 0..entries.len() {
            let Some(child) = self.generate(&mut asm, index) else {
                continue;
            };
            asm.child(&child, x, 0.0, None);
            asm.place(index, x, 0.0, 1.0, (index, 0));

            if index + 1 < entries.len() {
                asm.out.leaf(
                    &Element::new("line")
                        .attr("class", "fbd-connector")
                        .attr("x1", x + child.width)
                        .attr("y1", base_y)
                        .attr("x2", x + child.width + spacing)
                        .attr("y2", base_y)
                        .attr("stroke", "#666")
                        .attr("stroke-width", 2.0)
                        .attr("marker-end", format!("url(#{marker})")),
                );
            }

            x += child.width + spacing;
            max_height = max_height.max(child.height);
        }

        asm.finish(x + 50.0, max_height)
    }

    /// Top to bottom, each row numbered on the left
    pub fn parallel(&self, id: &str, entries: &[CompositionEntry]) -> Composition {
        let spacing = self.config.spacing;
        let mut asm = Assembly::new(id, entries);
        let mut y = 50.0;
        let mut max_width: f64 = 600.0;

        for index in 0..entries.len() {
            let Some(child) = self.generate(&mut asm, index) else {
                continue;
            };
            asm.child(&child, 0.0, y, None);
            asm.place(index, 0.0, y, 1.0, (0, index));
            asm.out.text(
                &Element::new("text")
                    .attr("class", "fbd-caption")
                    .attr("x", 20.0)
                    .attr("y", y + child.height / 2.0)
                    .attr("font-size", 14.0)
                    .attr("fill", "#666"),
                &(index + 1).to_string(),
            );

            y += child.height + spacing;
            max_width = max_width.max(child.width);
        }

        asm.finish(max_width + 100.0, y)
    }

    /// Row-major matrix of fixed cells, each child scaled to fit its cell
    pub fn grid(&self, id: &str, entries: &[CompositionEntry], columns: usize) -> Composition {
        let columns = columns.max(1);
        let spacing = self.config.spacing;
        let (cell_w, cell_h) = (self.config.grid_cell_width, self.config.grid_cell_height);
        let mut asm = Assembly::new(id, entries);

        for index in 0..entries.len() {
            let (row, col) = (index / columns, index % columns);
            let x = col as f64 * (cell_w + spacing) + 50.0;
            let y = row as f64 * (cell_h + spacing) + 50.0;

            let Some(child) = self.generate(&mut asm, index) else {
                continue;
            };
            let scale = (cell_w / child.width).min(cell_h / child.height) * 0.9;

            asm.out.leaf(
                &Element::new("rect")
                    .attr("class", "fbd-cell")
                    .attr("x", x - 10.0)
                    .attr("y", y - 10.0)
                    .attr("width", cell_w + 20.0)
                    .attr("height", cell_h + 20.0)
                    .attr("fill", "#f9fafb")
                    .attr("stroke", "#e5e7eb")
                    .attr("stroke-width", 2.0)
                    .attr("rx", 10.0),
            );
            asm.child(&child, x, y, Some(scale));
            asm.place(index, x, y, scale, (col, row));
            asm.out.text(
                &Element::new("text")
                    .attr("class", "fbd-caption")
                    .attr("x", x + cell_w / 2.0)
                    .attr("y", y + cell_h + 30.0)
                    .attr("font-size", 14.0)
                    .attr("text-anchor", "middle")
                    .attr("fill", "#333"),
                entries[index].caption(),
            );
        }

        let rows = entries.len().div_ceil(columns);
        let width = columns as f64 * (cell_w + spacing) + 100.0;
        let height = rows as f64 * (cell_h + spacing) + 100.0;
        asm.finish(width, height)
    }

    /// Labelled columns with an optional overall title
    pub fn comparison(&self, id: &str, entries: &[CompositionEntry], title: Option<&str>) -> Composition {
        let (cell_w, spacing) = (self.config.compare_cell_width, self.config.compare_spacing);
        let mut asm = Assembly::new(id, entries);

        if let Some(title) = title {
            asm.out.text(
                &Element::new("text")
                    .attr("class", "fbd-caption")
                    .attr("x", entries.len() as f64 * (cell_w + spacing) / 2.0)
                    .attr("y", 30.0)
                    .attr("font-size", 20.0)
                    .attr("text-anchor", "middle")
                    .attr("fill", "#333"),
                title,
            );
        }

        let mut x = 50.0;
        let mut column = 0;
        for index in 0..entries.len() {
            let Some(child) = self.generate(&mut asm, index) else {
                continue;
            };
            let scale = (cell_w / child.width).min(0.8);

            asm.out.text(
                &Element::new("text")
                    .attr("class", "fbd-caption")
                    .attr("x", x + cell_w / 2.0)
                    .attr("y", 70.0)
                    .attr("font-size", 16.0)
                    .attr("text-anchor", "middle")
                    .attr("fill", "#2563eb"),
                entries[index].caption(),
            );
            asm.child(&child, x, 90.0, Some(scale));
            asm.place(index, x, 90.0, scale, (column, 0));

            x += cell_w + spacing;
            column += 1;
        }

        asm.finish(x, 500.0)
    }

    /// Compose from a combination string, e.g. `GRID:2:incline,beam`
    pub fn parse_combination(&self, syntax: &str) -> Option<Composition> {
        self.parse_combination_detailed(syntax).ok()
    }

    pub fn parse_combination_detailed(&self, syntax: &str) -> Result<Composition, NotationError> {
        let combination = parse_combination(syntax)?;
        Ok(self.compose(combination.default_id(), &combination.layout, &combination.entries))
    }
}
