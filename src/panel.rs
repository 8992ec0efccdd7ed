// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! Panel document model: cubicles, compartments, sections and busbars

use crate::drag::DragHandle;
use crate::error::{PanelError, Result};
use crate::record::{BusbarRecord, CompartmentRecord, CubicleRecord, PanelRecord, SectionRecord};
use crate::store::validate_panel_name;
use crate::types::{
    BusbarId, BusbarRating, CubicleId, CubicleSize, Orientation, Point, ProjectGroup, Rect,
    SectionRef, SelectedComponent, ORIGIN, SECTION_NAMES,
};

/// Fill colour given to new cubicles
pub const DEFAULT_CUBICLE_COLOR: &str = "lightblue";

/// Half the side of the square resize handle at a busbar's trailing end
pub const HANDLE_HALF_SIZE: f64 = 6.0;

// =============================================================================
// Sections and Compartments
// =============================================================================

/// A labelled slot holding at most one component
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    name: &'static str,
    component: Option<SelectedComponent>,
}

impl Section {
    fn empty(name: &'static str) -> Self {
        Self {
            name,
            component: None,
        }
    }

    /// One of [`SECTION_NAMES`]
    #[must_use]
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// The selected component, if any
    #[must_use]
    pub fn component(&self) -> Option<&SelectedComponent> {
        self.component.as_ref()
    }

    /// Put `component` in the slot and hand back whatever was there
    pub fn replace(&mut self, component: Option<SelectedComponent>) -> Option<SelectedComponent> {
        std::mem::replace(&mut self.component, component)
    }
}

/// A horizontal band of a cubicle with one section per [`SECTION_NAMES`] entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Compartment {
    sections: Vec<Section>,
}

impl Compartment {
    fn new() -> Self {
        Self {
            sections: SECTION_NAMES.iter().map(|name| Section::empty(name)).collect(),
        }
    }

    /// Sections left to right
    #[must_use]
    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    /// Section by index
    #[must_use]
    pub fn section(&self, index: usize) -> Option<&Section> {
        self.sections.get(index)
    }
}

// =============================================================================
// Cubicle
// =============================================================================

/// A physical bay, tiled left to right inside the panel
#[derive(Debug, Clone, PartialEq)]
pub struct Cubicle {
    id: CubicleId,
    size: CubicleSize,
    origin: Point,
    color: String,
    compartments: Vec<Compartment>,
}

impl Cubicle {
    fn new(id: CubicleId, size: CubicleSize, origin: Point) -> Self {
        Self {
            id,
            size,
            origin,
            color: DEFAULT_CUBICLE_COLOR.to_string(),
            compartments: Vec::new(),
        }
    }

    /// Session id
    #[must_use]
    pub fn id(&self) -> CubicleId {
        self.id
    }

    /// Nominal size
    #[must_use]
    pub fn size(&self) -> CubicleSize {
        self.size
    }

    /// Top-left corner in drawing units
    #[must_use]
    pub fn origin(&self) -> Point {
        self.origin
    }

    /// Fill colour
    #[must_use]
    pub fn color(&self) -> &str {
        &self.color
    }

    /// Drawn outline
    #[must_use]
    pub fn rect(&self) -> Rect {
        Rect::new(
            self.origin.x,
            self.origin.y,
            self.origin.x + self.size.drawing_width(),
            self.origin.y + self.size.drawing_height(),
        )
    }

    /// Compartments top to bottom
    #[must_use]
    pub fn compartments(&self) -> &[Compartment] {
        &self.compartments
    }

    /// Split the cubicle into `count` equal bands of six sections each
    ///
    /// The count is fixed once chosen; a cubicle that already has compartments
    /// cannot be split again.
    pub fn create_compartments(&mut self, count: usize) -> Result<()> {
        if count == 0 {
            return Err(PanelError::InvalidInput(
                "a cubicle needs at least one compartment".into(),
            ));
        }
        if !self.compartments.is_empty() {
            return Err(PanelError::InvalidInput(format!(
                "{} already has {} compartments",
                self.id,
                self.compartments.len()
            )));
        }
        self.compartments = (0..count).map(|_| Compartment::new()).collect();
        Ok(())
    }

    /// Band occupied by compartment `index`; consecutive bands share edges exactly
    #[must_use]
    pub fn compartment_rect(&self, index: usize) -> Option<Rect> {
        let count = self.compartments.len();
        if index >= count {
            return None;
        }
        let outer = self.rect();
        let (y1, y2) = split_span(outer.y1, outer.y2, count, index);
        Some(Rect::new(outer.x1, y1, outer.x2, y2))
    }

    /// Rectangle of one section
    #[must_use]
    pub fn section_rect(&self, compartment: usize, section: usize) -> Option<Rect> {
        if section >= SECTION_NAMES.len() {
            return None;
        }
        let band = self.compartment_rect(compartment)?;
        let (x1, x2) = split_span(band.x1, band.x2, SECTION_NAMES.len(), section);
        Some(Rect::new(x1, band.y1, x2, band.y2))
    }

    fn section_mut(&mut self, compartment: usize, section: usize) -> Option<&mut Section> {
        self.compartments
            .get_mut(compartment)?
            .sections
            .get_mut(section)
    }
}

/// Bounds of part `index` when `[start, end]` is cut into `parts` equal pieces
fn split_span(start: f64, end: f64, parts: usize, index: usize) -> (f64, f64) {
    let step = (end - start) / parts as f64;
    let lo = start + index as f64 * step;
    let hi = if index + 1 == parts {
        end
    } else {
        start + (index + 1) as f64 * step
    };
    (lo, hi)
}

// =============================================================================
// Busbar
// =============================================================================

/// A drawn conductor run
#[derive(Debug, Clone, PartialEq)]
pub struct Busbar {
    id: BusbarId,
    orientation: Orientation,
    endpoints: Rect,
    phase: String,
    rating: BusbarRating,
}

impl Busbar {
    /// Where a newly created busbar of this kind is drawn
    #[must_use]
    pub fn default_endpoints(orientation: Orientation, rating: &BusbarRating) -> Rect {
        match (rating, orientation) {
            (BusbarRating::Computed { .. }, Orientation::Vertical) => Rect::new(150.0, 50.0, 150.0, 300.0),
            (BusbarRating::Computed { .. }, Orientation::Horizontal) => Rect::new(50.0, 100.0, 250.0, 100.0),
            (BusbarRating::Catalog { .. }, Orientation::Vertical) => Rect::new(200.0, 50.0, 200.0, 300.0),
            (BusbarRating::Catalog { .. }, Orientation::Horizontal) => Rect::new(50.0, 150.0, 250.0, 150.0),
        }
    }

    /// Session id
    #[must_use]
    pub fn id(&self) -> BusbarId {
        self.id
    }

    /// Run direction
    #[must_use]
    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    /// Endpoints as `(x1, y1)`-`(x2, y2)`; not normalised
    #[must_use]
    pub fn endpoints(&self) -> Rect {
        self.endpoints
    }

    /// Phase description
    #[must_use]
    pub fn phase(&self) -> &str {
        &self.phase
    }

    /// Computed or catalog rating
    #[must_use]
    pub fn rating(&self) -> &BusbarRating {
        &self.rating
    }

    /// Run length along its own axis, truncated to whole units
    #[must_use]
    pub fn length(&self) -> u64 {
        let span = match self.orientation {
            Orientation::Horizontal => self.endpoints.x2 - self.endpoints.x1,
            Orientation::Vertical => self.endpoints.y2 - self.endpoints.y1,
        };
        span.abs().trunc() as u64
    }

    /// Move both endpoints
    pub fn translate(&mut self, dx: f64, dy: f64) {
        self.endpoints.x1 += dx;
        self.endpoints.y1 += dy;
        self.endpoints.x2 += dx;
        self.endpoints.y2 += dy;
    }

    /// Stretch the trailing endpoint along the busbar's own axis
    pub fn extend(&mut self, dx: f64, dy: f64) {
        match self.orientation {
            Orientation::Vertical => self.endpoints.y2 += dy,
            Orientation::Horizontal => self.endpoints.x2 += dx,
        }
    }

    /// Square grab area centred on the trailing endpoint
    #[must_use]
    pub fn resize_handle(&self) -> Rect {
        let Rect { x2, y2, .. } = self.endpoints;
        Rect::new(
            x2 - HANDLE_HALF_SIZE,
            y2 - HANDLE_HALF_SIZE,
            x2 + HANDLE_HALF_SIZE,
            y2 + HANDLE_HALF_SIZE,
        )
    }

    /// Part of the busbar under `at`; the resize handle wins over the body
    #[must_use]
    pub fn grab(&self, at: Point) -> Option<DragHandle> {
        if self.resize_handle().contains(at) {
            return Some(DragHandle::Resize);
        }
        let Rect { x1, y1, x2, y2 } = self.endpoints;
        let body = Rect::new(
            x1.min(x2) - HANDLE_HALF_SIZE,
            y1.min(y2) - HANDLE_HALF_SIZE,
            x1.max(x2) + HANDLE_HALF_SIZE,
            y1.max(y2) + HANDLE_HALF_SIZE,
        );
        body.contains(at).then_some(DragHandle::Body)
    }

    fn to_record(&self) -> BusbarRecord {
        let (amperage, current_density, busbar_size, no_of_runs) = match &self.rating {
            BusbarRating::Computed {
                amperage,
                current_density,
            } => (Some(*amperage), Some(*current_density), None, None),
            BusbarRating::Catalog { size, runs } => (None, None, Some(size.clone()), Some(*runs)),
        };
        BusbarRecord {
            id: Some(self.id.0),
            orientation: self.orientation,
            coords: self.endpoints.coords(),
            amperage,
            current_density,
            phase: self.phase.clone(),
            busbar_size,
            no_of_runs,
        }
    }

    fn from_record(id: BusbarId, record: &BusbarRecord) -> Self {
        let rating = match record.busbar_size.as_deref() {
            Some(size) if !size.is_empty() => BusbarRating::Catalog {
                size: size.to_string(),
                runs: record.no_of_runs.unwrap_or(1),
            },
            _ => BusbarRating::Computed {
                amperage: record.amperage.unwrap_or(0.0),
                current_density: record.current_density.unwrap_or(0.0),
            },
        };
        let [x1, y1, x2, y2] = record.coords;
        Self {
            id,
            orientation: record.orientation,
            endpoints: Rect::new(x1, y1, x2, y2),
            phase: record.phase.clone(),
            rating,
        }
    }
}

// =============================================================================
// Panel
// =============================================================================

/// One switchgear panel design, the unit of save and load
#[derive(Debug, Clone, PartialEq)]
pub struct Panel {
    name: String,
    group: ProjectGroup,
    depth: Option<u32>,
    cubicles: Vec<Cubicle>,
    busbars: Vec<Busbar>,
    next_id: u64,
}

impl Panel {
    /// Start an empty panel after validating its name and depth
    ///
    /// Surrounding whitespace is dropped from the name.
    pub fn new(name: &str, group: ProjectGroup, depth: i64) -> Result<Self> {
        let name = name.trim();
        validate_panel_name(name)?;
        let depth = u32::try_from(depth)
            .ok()
            .filter(|d| *d > 0)
            .ok_or(PanelError::InvalidDepth(depth))?;
        Ok(Self {
            name: name.to_string(),
            group,
            depth: Some(depth),
            cubicles: Vec::new(),
            busbars: Vec::new(),
            next_id: 1,
        })
    }

    /// Rebuild a panel from its stored record with fresh session ids
    pub fn from_record(name: &str, record: &PanelRecord) -> Result<Self> {
        let mut panel = Self {
            name: name.to_string(),
            group: record.project_info.clone(),
            depth: record.panel_depth,
            cubicles: Vec::new(),
            busbars: Vec::new(),
            next_id: 1,
        };

        for stored in &record.cubicles {
            let [x, y, ..] = stored.coords;
            let id = CubicleId(panel.alloc_id());
            let mut cubicle = Cubicle::new(id, CubicleSize::new(stored.width, stored.height), Point::new(x, y));
            if let Some(color) = &stored.color {
                cubicle.color.clone_from(color);
            }
            if !stored.compartments.is_empty() {
                cubicle.create_compartments(stored.compartments.len())?;
            }
            for (comp_idx, comp) in stored.compartments.iter().enumerate() {
                for (sec_idx, sec) in comp.sections.iter().enumerate().take(SECTION_NAMES.len()) {
                    if let Some(section) = cubicle.section_mut(comp_idx, sec_idx) {
                        section.component.clone_from(&sec.item);
                    }
                }
            }
            panel.cubicles.push(cubicle);
        }

        for stored in &record.busbars {
            let id = BusbarId(panel.alloc_id());
            panel.busbars.push(Busbar::from_record(id, stored));
        }

        Ok(panel)
    }

    /// Persisted form of the panel
    #[must_use]
    pub fn to_record(&self) -> PanelRecord {
        PanelRecord {
            project_info: self.group.clone(),
            panel_depth: self.depth,
            cubicles: self
                .cubicles
                .iter()
                .map(|cub| CubicleRecord {
                    coords: cub.rect().coords(),
                    width: cub.size.width_mm,
                    height: cub.size.height_mm,
                    color: Some(cub.color.clone()),
                    compartments: cub
                        .compartments
                        .iter()
                        .map(|comp| CompartmentRecord {
                            sections: comp
                                .sections
                                .iter()
                                .map(|sec| SectionRecord {
                                    name: sec.name.to_string(),
                                    item: sec.component.clone(),
                                })
                                .collect(),
                        })
                        .collect(),
                })
                .collect(),
            busbars: self.busbars.iter().map(Busbar::to_record).collect(),
        }
    }

    /// Panel name, unique in the store
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Owning project group
    #[must_use]
    pub fn group(&self) -> &ProjectGroup {
        &self.group
    }

    /// Depth in mm
    #[must_use]
    pub fn depth(&self) -> Option<u32> {
        self.depth
    }

    /// Caption drawn in the corner of the canvas
    #[must_use]
    pub fn depth_label(&self) -> Option<String> {
        self.depth.map(|d| format!("Depth: {d} mm"))
    }

    /// Cubicles left to right
    #[must_use]
    pub fn cubicles(&self) -> &[Cubicle] {
        &self.cubicles
    }

    /// Busbars in creation order
    #[must_use]
    pub fn busbars(&self) -> &[Busbar] {
        &self.busbars
    }

    /// Cubicle by id
    #[must_use]
    pub fn cubicle(&self, id: CubicleId) -> Option<&Cubicle> {
        self.cubicles.iter().find(|c| c.id == id)
    }

    /// Busbar by id
    #[must_use]
    pub fn busbar(&self, id: BusbarId) -> Option<&Busbar> {
        self.busbars.iter().find(|b| b.id == id)
    }

    /// Topmost busbar under `at`, most recently created first
    #[must_use]
    pub fn busbar_at(&self, at: Point) -> Option<(BusbarId, DragHandle)> {
        self.busbars
            .iter()
            .rev()
            .find_map(|b| b.grab(at).map(|handle| (b.id, handle)))
    }

    /// Mutable busbar by id
    pub fn busbar_mut(&mut self, id: BusbarId) -> Option<&mut Busbar> {
        self.busbars.iter_mut().find(|b| b.id == id)
    }

    /// Section addressed by `at`
    #[must_use]
    pub fn section(&self, at: SectionRef) -> Option<&Section> {
        self.cubicle(at.cubicle)?
            .compartments
            .get(at.compartment)?
            .sections
            .get(at.section)
    }

    /// Mutable section addressed by `at`
    pub fn section_mut(&mut self, at: SectionRef) -> Option<&mut Section> {
        self.cubicles
            .iter_mut()
            .find(|c| c.id == at.cubicle)?
            .section_mut(at.compartment, at.section)
    }

    /// Address of a section by its 0-based cubicle and compartment positions
    #[must_use]
    pub fn section_ref(&self, cubicle: usize, compartment: usize, section: usize) -> Option<SectionRef> {
        let cub = self.cubicles.get(cubicle)?;
        cub.compartments.get(compartment)?.sections.get(section)?;
        Some(SectionRef {
            cubicle: cub.id,
            compartment,
            section,
        })
    }

    /// Where the next cubicle goes: right after the last one, or at [`ORIGIN`]
    #[must_use]
    pub fn next_cubicle_origin(&self) -> Point {
        self.cubicles.last().map_or(ORIGIN, |last| {
            Point::new(last.origin.x + last.size.drawing_width(), last.origin.y)
        })
    }

    /// Every selected component with the name of its section
    pub fn selected_components(&self) -> impl Iterator<Item = (&'static str, &SelectedComponent)> + '_ {
        self.cubicles
            .iter()
            .flat_map(|c| c.compartments.iter())
            .flat_map(|comp| comp.sections.iter())
            .filter_map(|sec| sec.component.as_ref().map(|item| (sec.name, item)))
    }

    pub(crate) fn append_cubicle(&mut self, size: CubicleSize, compartments: usize) -> Result<CubicleId> {
        let id = CubicleId(self.next_id);
        let mut cubicle = Cubicle::new(id, size, self.next_cubicle_origin());
        cubicle.create_compartments(compartments)?;
        self.next_id += 1;
        self.cubicles.push(cubicle);
        Ok(id)
    }

    pub(crate) fn remove_cubicle(&mut self, id: CubicleId) -> Option<Cubicle> {
        let idx = self.cubicles.iter().position(|c| c.id == id)?;
        Some(self.cubicles.remove(idx))
    }

    pub(crate) fn pop_cubicle(&mut self) -> Option<Cubicle> {
        self.cubicles.pop()
    }

    pub(crate) fn append_busbar(&mut self, orientation: Orientation, phase: String, rating: BusbarRating) -> BusbarId {
        let id = BusbarId(self.alloc_id());
        let endpoints = Busbar::default_endpoints(orientation, &rating);
        self.busbars.push(Busbar {
            id,
            orientation,
            endpoints,
            phase,
            rating,
        });
        id
    }

    pub(crate) fn remove_busbar(&mut self, id: BusbarId) -> Option<Busbar> {
        let idx = self.busbars.iter().position(|b| b.id == id)?;
        Some(self.busbars.remove(idx))
    }

    fn alloc_id(&mut self) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::CUBICLE_SIZES;

    fn group() -> ProjectGroup {
        ProjectGroup::new("Acme", "Substation 4", "Q-118")
    }

    #[test]
    fn test_new_panel_validation() {
        assert!(matches!(Panel::new("", group(), 600), Err(PanelError::InvalidName(_))));
        assert!(matches!(Panel::new("MDB", group(), 0), Err(PanelError::InvalidDepth(0))));
        assert!(matches!(Panel::new("MDB", group(), -5), Err(PanelError::InvalidDepth(-5))));

        assert!(matches!(Panel::new("   ", group(), 600), Err(PanelError::InvalidName(_))));
        assert!(matches!(Panel::new("a/b", group(), 600), Err(PanelError::InvalidName(_))));

        let panel = Panel::new("MDB", group(), 600).unwrap();
        assert_eq!(panel.depth(), Some(600));
        assert_eq!(panel.depth_label().as_deref(), Some("Depth: 600 mm"));
    }

    #[test]
    fn test_new_panel_trims_name() {
        let panel = Panel::new("  MDB-1 ", group(), 600).unwrap();
        assert_eq!(panel.name(), "MDB-1");
        assert_eq!(panel.to_record().project_info, group());
    }

    #[test]
    fn test_cubicles_tile_left_to_right() {
        let mut panel = Panel::new("MDB", group(), 600).unwrap();
        panel.append_cubicle(CubicleSize::new(800, 2000), 1).unwrap();
        panel.append_cubicle(CubicleSize::new(600, 1800), 2).unwrap();
        panel.append_cubicle(CubicleSize::new(1000, 400), 1).unwrap();

        let xs: Vec<f64> = panel.cubicles().iter().map(|c| c.origin().x).collect();
        for (x, expected) in xs.iter().zip([50.0, 210.0, 330.0]) {
            assert!((x - expected).abs() < 1e-9, "{x} != {expected}");
        }
        assert!(panel.cubicles().iter().all(|c| c.origin().y == 50.0));
    }

    #[test]
    fn test_compartments_partition_height() {
        let mut panel = Panel::new("MDB", group(), 600).unwrap();
        let id = panel.append_cubicle(CUBICLE_SIZES[4], 3).unwrap();
        let cubicle = panel.cubicle(id).unwrap();

        let outer = cubicle.rect();
        let bands: Vec<Rect> = (0..3).map(|i| cubicle.compartment_rect(i).unwrap()).collect();
        assert_eq!(bands[0].y1, outer.y1);
        assert_eq!(bands[2].y2, outer.y2);
        assert_eq!(bands[0].y2, bands[1].y1);
        assert_eq!(bands[1].y2, bands[2].y1);
        assert!(cubicle.compartment_rect(3).is_none());

        let sec = cubicle.section_rect(1, 5).unwrap();
        assert_eq!(sec.x2, outer.x2);
        assert!((sec.width() - outer.width() / 6.0).abs() < 1e-9);
        assert_eq!(cubicle.compartments()[0].sections()[3].name(), "Power Analyzer/Energy Meter");
    }

    #[test]
    fn test_create_compartments_is_one_shot() {
        let mut cubicle = Cubicle::new(CubicleId(1), CUBICLE_SIZES[0], ORIGIN);
        assert!(cubicle.create_compartments(0).is_err());
        cubicle.create_compartments(2).unwrap();
        assert!(matches!(cubicle.create_compartments(1), Err(PanelError::InvalidInput(_))));
        assert_eq!(cubicle.compartments().len(), 2);
    }

    #[test]
    fn test_busbar_length_and_handles() {
        let mut panel = Panel::new("MDB", group(), 600).unwrap();
        let v = panel.append_busbar(
            Orientation::Vertical,
            "Single Phase".into(),
            BusbarRating::Computed { amperage: 100.0, current_density: 2.5 },
        );
        let bar = panel.busbar_mut(v).unwrap();
        assert_eq!(bar.length(), 250);

        bar.extend(40.0, 10.5);
        assert_eq!(bar.endpoints(), Rect::new(150.0, 50.0, 150.0, 310.5));
        assert_eq!(bar.length(), 260);

        bar.translate(5.0, -5.0);
        assert_eq!(bar.length(), 260);
        assert_eq!(bar.resize_handle().x1, 149.0);

        bar.extend(0.0, -400.0);
        assert_eq!(bar.length(), 139);
    }

    #[test]
    fn test_busbar_hit_testing() {
        let mut panel = Panel::new("MDB", group(), 600).unwrap();
        let v = panel.append_busbar(
            Orientation::Vertical,
            "Single Phase".into(),
            BusbarRating::Computed { amperage: 100.0, current_density: 2.5 },
        );
        let h = panel.append_busbar(
            Orientation::Horizontal,
            "Single Phase".into(),
            BusbarRating::Computed { amperage: 100.0, current_density: 2.5 },
        );

        // Vertical runs 150,50 -> 150,300; horizontal runs 50,100 -> 250,100
        assert_eq!(panel.busbar_at(Point::new(152.0, 298.0)), Some((v, DragHandle::Resize)));
        assert_eq!(panel.busbar_at(Point::new(147.0, 200.0)), Some((v, DragHandle::Body)));
        assert_eq!(panel.busbar_at(Point::new(150.0, 100.0)), Some((h, DragHandle::Body)));
        assert_eq!(panel.busbar_at(Point::new(250.0, 105.0)), Some((h, DragHandle::Resize)));
        assert_eq!(panel.busbar_at(Point::new(400.0, 400.0)), None);
    }

    #[test]
    fn test_record_round_trip() {
        let mut panel = Panel::new("MDB", group(), 800).unwrap();
        panel.append_cubicle(CUBICLE_SIZES[1], 2).unwrap();
        let at = panel.section_ref(0, 1, 2).unwrap();
        panel.section_mut(at).unwrap().replace(Some(SelectedComponent::new("PFR-12", "PF relay")));
        panel.append_busbar(
            Orientation::Horizontal,
            "Three Phase".into(),
            BusbarRating::Catalog { size: "40x10 Cu Busbar (5.5m Length) LVT".into(), runs: 3 },
        );

        let record = panel.to_record();
        let restored = Panel::from_record("MDB", &record).unwrap();

        assert_eq!(restored.to_record().cubicles, record.cubicles);
        assert_eq!(restored.cubicles()[0].rect(), panel.cubicles()[0].rect());
        assert_eq!(
            restored.section(restored.section_ref(0, 1, 2).unwrap()).unwrap().component(),
            Some(&SelectedComponent::new("PFR-12", "PF relay"))
        );
        assert_eq!(restored.busbars()[0].rating(), panel.busbars()[0].rating());
    }

    #[test]
    fn test_blank_busbar_size_reads_as_computed() {
        let record = BusbarRecord {
            id: None,
            orientation: Orientation::Horizontal,
            coords: [0.0, 0.0, 10.0, 0.0],
            amperage: None,
            current_density: None,
            phase: "Single Phase".into(),
            busbar_size: Some(String::new()),
            no_of_runs: None,
        };
        let bar = Busbar::from_record(BusbarId(1), &record);
        assert!(matches!(bar.rating(), BusbarRating::Computed { amperage, .. } if *amperage == 0.0));
    }
}
