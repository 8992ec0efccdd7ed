// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! Edit engine - the operations that change a panel, and their undo contracts
//!
//! Every discrete edit (adding a cubicle, selecting a component, adding a
//! busbar) pushes exactly one entry onto the undo log. Pointer drags and
//! resizes change busbars in place and are not undoable on their own;
//! undoing a busbar's creation discards them along with it.

use crate::catalog::BreakerCatalog;
use crate::drag::{DragHandle, DragState};
use crate::error::{PanelError, Result};
use crate::panel::{Busbar, Cubicle, Panel};
use crate::store::PanelStore;
use crate::types::{
    BusbarId, BusbarRating, CubicleId, CubicleSize, Orientation, Point, ProjectGroup, SectionRef,
    SelectedComponent,
};
use crate::undo::{UndoEntry, UndoLog};
use tracing::{debug, info, warn};

/// Parameters for a new busbar
#[derive(Debug, Clone, PartialEq)]
pub struct NewBusbar {
    /// Run direction
    pub orientation: Orientation,
    /// Phase description
    pub phase: String,
    /// Computed or catalog rating
    pub rating: BusbarRating,
}

impl NewBusbar {
    /// Busbar sized from amperage and current density
    pub fn computed(orientation: Orientation, amperage: f64, current_density: f64, phase: impl Into<String>) -> Self {
        Self {
            orientation,
            phase: phase.into(),
            rating: BusbarRating::Computed {
                amperage,
                current_density,
            },
        }
    }

    /// Busbar terminal with an explicit catalog size
    pub fn catalog(orientation: Orientation, size: impl Into<String>, runs: u32, phase: impl Into<String>) -> Self {
        Self {
            orientation,
            phase: phase.into(),
            rating: BusbarRating::Catalog {
                size: size.into(),
                runs,
            },
        }
    }

    fn validate(&self) -> Result<()> {
        match &self.rating {
            BusbarRating::Computed {
                amperage,
                current_density,
            } => {
                if !amperage.is_finite() || !current_density.is_finite() {
                    return Err(PanelError::InvalidInput(
                        "amperage and current density must be numbers".into(),
                    ));
                }
            }
            BusbarRating::Catalog { size, runs } => {
                if size.trim().is_empty() {
                    return Err(PanelError::InvalidInput("busbar size is required".into()));
                }
                if *runs == 0 {
                    return Err(PanelError::InvalidInput(
                        "no. of runs must be a positive integer".into(),
                    ));
                }
            }
        }
        Ok(())
    }
}

/// Editing session for one project group: the open panel, its undo log and drag state
#[derive(Debug, Default)]
pub struct Editor {
    group: ProjectGroup,
    panel: Option<Panel>,
    undo: UndoLog,
    drag: DragState,
}

impl Editor {
    /// Start a session with no panel open
    #[must_use]
    pub fn new(group: ProjectGroup) -> Self {
        Self {
            group,
            ..Self::default()
        }
    }

    /// Project group of this session
    #[must_use]
    pub fn group(&self) -> &ProjectGroup {
        &self.group
    }

    /// The open panel
    #[must_use]
    pub fn panel(&self) -> Option<&Panel> {
        self.panel.as_ref()
    }

    /// Current drag state
    #[must_use]
    pub fn drag_state(&self) -> DragState {
        self.drag
    }

    /// Number of undoable edits
    #[must_use]
    pub fn undo_depth(&self) -> usize {
        self.undo.len()
    }

    // =========================================================================
    // Document lifecycle
    // =========================================================================

    /// Open a new empty panel, discarding the current one and all editing state
    pub fn create_panel(&mut self, name: &str, depth: i64) -> Result<&Panel> {
        let panel = Panel::new(name, self.group.clone(), depth)?;
        info!("Created panel {} (depth {} mm)", panel.name(), depth);
        Ok(self.open(panel))
    }

    /// Open a stored panel; the undo log starts empty
    pub fn load_panel(&mut self, store: &dyn PanelStore, name: &str) -> Result<&Panel> {
        let name = name.trim();
        let record = store.read(name)?;
        let panel = Panel::from_record(name, &record)?;
        info!(
            "Loaded panel {} ({} cubicles, {} busbars)",
            name,
            panel.cubicles().len(),
            panel.busbars().len()
        );
        Ok(self.open(panel))
    }

    /// Persist the open panel under its name, replacing any earlier version
    ///
    /// Returns the refreshed panel list of the project group.
    pub fn save_panel(&self, store: &mut dyn PanelStore) -> Result<Vec<String>> {
        let panel = self.panel.as_ref().ok_or(PanelError::NoPanel)?;
        store.write(panel.name(), &panel.to_record())?;
        info!("Saved panel {}", panel.name());
        store.list_group(&self.group)
    }

    /// Panels stored for this session's project group
    pub fn list_panels(&self, store: &dyn PanelStore) -> Result<Vec<String>> {
        store.list_group(&self.group)
    }

    fn open(&mut self, panel: Panel) -> &Panel {
        self.undo.clear();
        self.drag.release();
        self.panel.insert(panel)
    }

    fn panel_mut(&mut self) -> Result<&mut Panel> {
        self.panel.as_mut().ok_or(PanelError::NoPanel)
    }

    // =========================================================================
    // Cubicles
    // =========================================================================

    /// Append a cubicle of a standard size, split into `compartments` bands
    pub fn add_cubicle(&mut self, size: CubicleSize, compartments: usize) -> Result<CubicleId> {
        if !size.is_standard() {
            return Err(PanelError::InvalidInput(format!("unknown cubicle size: {size}")));
        }
        let id = self.panel_mut()?.append_cubicle(size, compartments)?;
        self.undo.push(UndoEntry::AddCubicle(id));
        debug!("Added {} ({}) with {} compartments", id, size, compartments);
        Ok(id)
    }

    /// Remove the most recently appended cubicle without going through the undo log
    ///
    /// Undo entries that refer to the removed cubicle are dropped with it.
    pub fn delete_last_cubicle(&mut self) -> Result<Cubicle> {
        let cubicle = self
            .panel_mut()?
            .pop_cubicle()
            .ok_or_else(|| PanelError::InvalidInput("no cubicles to delete".into()))?;
        let id = cubicle.id();
        self.undo.retain(|entry| !entry.refers_to_cubicle(id));
        debug!("Deleted {}", id);
        Ok(cubicle)
    }

    // =========================================================================
    // Sections
    // =========================================================================

    /// Put a component in a section, returning the one it replaced
    pub fn select_component(&mut self, at: SectionRef, component: SelectedComponent) -> Result<Option<SelectedComponent>> {
        let section = self
            .panel_mut()?
            .section_mut(at)
            .ok_or_else(|| PanelError::NotFound(format!("section {at:?}")))?;
        let previous = section.replace(Some(component));
        debug!("Section {:?} now holds {:?}", at, section.component().map(|c| &c.model));
        self.undo.push(UndoEntry::SelectComponent {
            at,
            previous: previous.clone(),
        });
        Ok(previous)
    }

    /// Select a catalog model for a section
    pub fn select_from_catalog(&mut self, at: SectionRef, catalog: &BreakerCatalog, model: &str) -> Result<Option<SelectedComponent>> {
        let component = catalog.component(model)?;
        self.select_component(at, component)
    }

    // =========================================================================
    // Busbars
    // =========================================================================

    /// Create a busbar at the default position for its kind
    pub fn add_busbar(&mut self, request: NewBusbar) -> Result<BusbarId> {
        request.validate()?;
        let NewBusbar {
            orientation,
            phase,
            rating,
        } = request;
        let id = self.panel_mut()?.append_busbar(orientation, phase, rating);
        self.undo.push(UndoEntry::AddBusbar(id));
        debug!("Added {} ({})", id, orientation);
        Ok(id)
    }

    /// Translate a busbar; not recorded in the undo log
    pub fn move_busbar(&mut self, id: BusbarId, dx: f64, dy: f64) -> Result<()> {
        self.busbar_mut(id)?.translate(dx, dy);
        Ok(())
    }

    /// Stretch a busbar's trailing end along its axis; not recorded in the undo log
    pub fn resize_busbar(&mut self, id: BusbarId, dx: f64, dy: f64) -> Result<()> {
        self.busbar_mut(id)?.extend(dx, dy);
        Ok(())
    }

    fn busbar_mut(&mut self, id: BusbarId) -> Result<&mut Busbar> {
        self.panel_mut()?
            .busbar_mut(id)
            .ok_or_else(|| PanelError::NotFound(id.to_string()))
    }

    // =========================================================================
    // Pointer events
    // =========================================================================

    /// Pointer pressed on a busbar body or its resize handle
    pub fn pointer_press(&mut self, target: BusbarId, handle: DragHandle, at: Point) -> Result<()> {
        self.busbar_mut(target)?;
        self.drag.press(target, handle, at);
        Ok(())
    }

    /// Pointer pressed at `at`; starts a drag on the topmost busbar there, if any
    pub fn pointer_press_at(&mut self, at: Point) -> Result<Option<BusbarId>> {
        let panel = self.panel.as_ref().ok_or(PanelError::NoPanel)?;
        let Some((target, handle)) = panel.busbar_at(at) else {
            return Ok(None);
        };
        self.drag.press(target, handle, at);
        Ok(Some(target))
    }

    /// Pointer moved; applies the delta to the dragged busbar, if any
    pub fn pointer_move(&mut self, at: Point) -> Result<()> {
        let Some(step) = self.drag.motion(at) else {
            return Ok(());
        };
        match step.handle {
            DragHandle::Body => self.move_busbar(step.target, step.dx, step.dy),
            DragHandle::Resize => self.resize_busbar(step.target, step.dx, step.dy),
        }
    }

    /// Pointer released; ends any drag
    pub fn pointer_release(&mut self) {
        self.drag.release();
    }

    // =========================================================================
    // Undo
    // =========================================================================

    /// Reverse the most recent discrete edit; `None` when there is nothing to undo
    pub fn undo(&mut self) -> Option<UndoEntry> {
        let panel = self.panel.as_mut()?;
        let entry = self.undo.pop()?;

        match &entry {
            UndoEntry::AddCubicle(id) => {
                if panel.remove_cubicle(*id).is_none() {
                    warn!("Undo: {} is already gone", id);
                }
            }
            UndoEntry::SelectComponent { at, previous } => match panel.section_mut(*at) {
                Some(section) => {
                    section.replace(previous.clone());
                }
                None => warn!("Undo: section {:?} is already gone", at),
            },
            UndoEntry::AddBusbar(id) => {
                if self.drag.target() == Some(*id) {
                    self.drag.release();
                }
                if panel.remove_busbar(*id).is_none() {
                    warn!("Undo: {} is already gone", id);
                }
            }
        }

        debug!("Undid {:?}", entry);
        Some(entry)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;
    use crate::types::{CUBICLE_SIZES, SINGLE_PHASE, THREE_PHASE};

    fn editor_with_panel() -> Editor {
        let mut editor = Editor::new(ProjectGroup::new("Acme", "Substation 4", "Q-118"));
        editor.create_panel("MDB-1", 600).unwrap();
        editor
    }

    #[test]
    fn test_edits_require_open_panel() {
        let mut editor = Editor::new(ProjectGroup::default());
        assert!(matches!(editor.add_cubicle(CUBICLE_SIZES[0], 1), Err(PanelError::NoPanel)));
        assert!(matches!(
            editor.add_busbar(NewBusbar::computed(Orientation::Vertical, 100.0, 2.5, SINGLE_PHASE)),
            Err(PanelError::NoPanel)
        ));
        assert!(editor.undo().is_none());
    }

    #[test]
    fn test_invalid_input_leaves_state_untouched() {
        let mut editor = editor_with_panel();
        assert!(editor.add_cubicle(CubicleSize::new(700, 1800), 2).is_err());
        assert!(editor.add_cubicle(CUBICLE_SIZES[0], 0).is_err());
        assert!(editor
            .add_busbar(NewBusbar::catalog(Orientation::Horizontal, "40x10 Cu", 0, THREE_PHASE))
            .is_err());

        assert!(editor.panel().unwrap().cubicles().is_empty());
        assert!(editor.panel().unwrap().busbars().is_empty());
        assert_eq!(editor.undo_depth(), 0);
    }

    #[test]
    fn test_select_replace_then_undo_restores_previous() {
        let mut editor = editor_with_panel();
        editor.add_cubicle(CUBICLE_SIZES[1], 2).unwrap();
        let at = editor.panel().unwrap().section_ref(0, 1, 0).unwrap();

        let first = SelectedComponent::new("NSX100F", "MCCB 100A");
        let second = SelectedComponent::new("NSX160F", "MCCB 160A");
        assert_eq!(editor.select_component(at, first.clone()).unwrap(), None);
        assert_eq!(editor.select_component(at, second.clone()).unwrap(), Some(first.clone()));

        let section = editor.panel().unwrap().section(at).unwrap();
        assert_eq!(section.component(), Some(&second));

        editor.undo().unwrap();
        assert_eq!(editor.panel().unwrap().section(at).unwrap().component(), Some(&first));
        editor.undo().unwrap();
        assert_eq!(editor.panel().unwrap().section(at).unwrap().component(), None);
    }

    #[test]
    fn test_undo_add_cubicle_removes_compartments() {
        let mut editor = editor_with_panel();
        editor.add_cubicle(CUBICLE_SIZES[0], 3).unwrap();
        editor.add_cubicle(CUBICLE_SIZES[2], 1).unwrap();

        assert!(matches!(editor.undo(), Some(UndoEntry::AddCubicle(_))));
        let panel = editor.panel().unwrap();
        assert_eq!(panel.cubicles().len(), 1);
        assert_eq!(panel.cubicles()[0].compartments().len(), 3);
    }

    #[test]
    fn test_drag_and_resize_are_not_undo_checkpoints() {
        let mut editor = editor_with_panel();
        let id = editor
            .add_busbar(NewBusbar::computed(Orientation::Horizontal, 100.0, 2.5, SINGLE_PHASE))
            .unwrap();

        editor.pointer_press(id, DragHandle::Body, Point::new(60.0, 100.0)).unwrap();
        editor.pointer_move(Point::new(70.0, 120.0)).unwrap();
        editor.pointer_release();
        editor.pointer_press(id, DragHandle::Resize, Point::new(260.0, 120.0)).unwrap();
        editor.pointer_move(Point::new(300.0, 500.0)).unwrap();
        editor.pointer_release();

        let bar = editor.panel().unwrap().busbar(id).unwrap();
        assert_eq!(bar.endpoints().coords(), [60.0, 120.0, 300.0, 120.0]);
        assert_eq!(bar.length(), 240);
        assert_eq!(editor.undo_depth(), 1);

        editor.pointer_move(Point::new(0.0, 0.0)).unwrap();
        assert_eq!(editor.panel().unwrap().busbar(id).unwrap().length(), 240);

        assert!(matches!(editor.undo(), Some(UndoEntry::AddBusbar(_))));
        assert!(editor.panel().unwrap().busbars().is_empty());
    }

    #[test]
    fn test_pointer_press_picks_busbar_part() {
        let mut editor = editor_with_panel();
        let id = editor
            .add_busbar(NewBusbar::computed(Orientation::Vertical, 100.0, 2.5, SINGLE_PHASE))
            .unwrap();

        assert_eq!(editor.pointer_press_at(Point::new(500.0, 500.0)).unwrap(), None);
        assert_eq!(editor.drag_state(), DragState::Idle);

        assert_eq!(editor.pointer_press_at(Point::new(150.0, 300.0)).unwrap(), Some(id));
        editor.pointer_move(Point::new(150.0, 340.0)).unwrap();
        editor.pointer_release();
        assert_eq!(editor.panel().unwrap().busbar(id).unwrap().length(), 290);

        assert_eq!(editor.pointer_press_at(Point::new(150.0, 100.0)).unwrap(), Some(id));
        editor.pointer_move(Point::new(170.0, 100.0)).unwrap();
        editor.pointer_release();
        let bar = editor.panel().unwrap().busbar(id).unwrap();
        assert_eq!(bar.endpoints().coords(), [170.0, 50.0, 170.0, 340.0]);
    }

    #[test]
    fn test_undo_of_dragged_busbar_clears_drag() {
        let mut editor = editor_with_panel();
        let id = editor
            .add_busbar(NewBusbar::catalog(Orientation::Vertical, "50x10 Cu", 2, THREE_PHASE))
            .unwrap();
        editor.pointer_press(id, DragHandle::Body, Point::new(200.0, 60.0)).unwrap();

        editor.undo();
        assert_eq!(editor.drag_state(), DragState::Idle);
        assert!(editor.pointer_move(Point::new(210.0, 70.0)).is_ok());
    }

    #[test]
    fn test_delete_last_cubicle_purges_its_undo_entries() {
        let mut editor = editor_with_panel();
        editor.add_cubicle(CUBICLE_SIZES[0], 1).unwrap();
        let busbar = editor
            .add_busbar(NewBusbar::computed(Orientation::Vertical, 400.0, 2.0, SINGLE_PHASE))
            .unwrap();
        editor.add_cubicle(CUBICLE_SIZES[0], 1).unwrap();
        let at = editor.panel().unwrap().section_ref(1, 0, 5).unwrap();
        editor.select_component(at, SelectedComponent::new("SPD-T2", "Surge")).unwrap();

        let removed = editor.delete_last_cubicle().unwrap();
        assert_eq!(removed.id(), at.cubicle);
        assert_eq!(editor.undo_depth(), 2);

        assert_eq!(editor.undo(), Some(UndoEntry::AddBusbar(busbar)));
        assert!(matches!(editor.undo(), Some(UndoEntry::AddCubicle(_))));
        assert!(editor.panel().unwrap().cubicles().is_empty());
        assert!(editor.delete_last_cubicle().is_err());
    }

    #[test]
    fn test_load_resets_undo_and_save_lists_group() {
        let mut store = MemoryStore::new();
        let mut editor = editor_with_panel();
        editor.add_cubicle(CUBICLE_SIZES[3], 2).unwrap();
        assert_eq!(editor.save_panel(&mut store).unwrap(), vec!["MDB-1"]);

        editor.create_panel("MDB-2", 800).unwrap();
        assert_eq!(editor.undo_depth(), 0);
        assert_eq!(editor.save_panel(&mut store).unwrap(), vec!["MDB-1", "MDB-2"]);

        editor.load_panel(&store, "MDB-1").unwrap();
        assert_eq!(editor.undo_depth(), 0);
        assert_eq!(editor.panel().unwrap().cubicles().len(), 1);

        assert!(matches!(editor.load_panel(&store, "missing"), Err(PanelError::NotFound(_))));
        assert_eq!(editor.panel().unwrap().name(), "MDB-1");
    }

    #[test]
    fn test_select_from_catalog() {
        let mut catalog = BreakerCatalog::new();
        catalog.insert("VAMP 50", "Feeder protection relay");
        let mut editor = editor_with_panel();
        editor.add_cubicle(CUBICLE_SIZES[0], 1).unwrap();
        let at = editor.panel().unwrap().section_ref(0, 0, 1).unwrap();

        editor.select_from_catalog(at, &catalog, "VAMP 50").unwrap();
        assert_eq!(
            editor.panel().unwrap().section(at).unwrap().component().unwrap().description,
            "Feeder protection relay"
        );
        assert!(matches!(
            editor.select_from_catalog(at, &catalog, "unknown"),
            Err(PanelError::NotFound(_))
        ));
        assert_eq!(editor.undo_depth(), 2);
    }
}
