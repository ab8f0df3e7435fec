use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::core::{Bounding, Pane, PaneId, PaneKind, PaneOptions, TIME_AXIS_ORDER};

/// Height defaults applied to panes created without explicit values.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PaneDefaults {
    pub height: f64,
    pub min_height: f64,
}

impl Default for PaneDefaults {
    fn default() -> Self {
        Self {
            height: 100.0,
            min_height: 30.0,
        }
    }
}

/// Divider between two adjacent content panes, keyed by the pane below it.
#[derive(Debug, Clone, PartialEq)]
pub struct Separator {
    pane_id: PaneId,
    top_pane_id: PaneId,
    visible: bool,
    geometry: Bounding,
}

impl Separator {
    #[must_use]
    pub fn pane_id(&self) -> &PaneId {
        &self.pane_id
    }

    /// Pane directly above the separator in sorted order.
    #[must_use]
    pub fn top_pane_id(&self) -> &PaneId {
        &self.top_pane_id
    }

    #[must_use]
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub(crate) fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    #[must_use]
    pub fn geometry(&self) -> Bounding {
        self.geometry
    }

    pub(crate) fn geometry_mut(&mut self) -> &mut Bounding {
        &mut self.geometry
    }
}

/// Ordered pane collection plus the separator map derived from it.
///
/// The candle and time-axis panes exist for the registry's whole lifetime.
#[derive(Debug, Clone, PartialEq)]
pub struct PaneRegistry {
    panes: IndexMap<PaneId, Pane>,
    separators: IndexMap<PaneId, Separator>,
    defaults: PaneDefaults,
    next_order: i32,
    next_generated_id: u32,
}

impl PaneRegistry {
    #[must_use]
    pub fn new(defaults: PaneDefaults) -> Self {
        let mut panes = IndexMap::new();
        panes.insert(
            PaneId::candle(),
            Pane::new(
                PaneId::candle(),
                PaneKind::Candle,
                0,
                defaults.height,
                defaults.min_height,
            ),
        );
        panes.insert(
            PaneId::time_axis(),
            Pane::new(
                PaneId::time_axis(),
                PaneKind::TimeAxis,
                TIME_AXIS_ORDER,
                0.0,
                0.0,
            ),
        );
        let mut registry = Self {
            panes,
            separators: IndexMap::new(),
            defaults,
            next_order: 1,
            next_generated_id: 1,
        };
        registry.sort();
        registry
    }

    #[must_use]
    pub fn defaults(&self) -> PaneDefaults {
        self.defaults
    }

    /// Appends a content pane; returns `None` when the id is already taken or
    /// the kind is reserved for the built-in panes.
    pub fn add_pane(
        &mut self,
        kind: PaneKind,
        id: Option<PaneId>,
        options: PaneOptions,
    ) -> Option<PaneId> {
        if kind.is_elastic() {
            return None;
        }
        let id = match id {
            Some(id) if self.panes.contains_key(&id) || id.is_reserved() => return None,
            Some(id) => id,
            None => self.generate_id(),
        };

        let order = options.order.unwrap_or_else(|| {
            let order = self.next_order;
            self.next_order = self.next_order.saturating_add(1);
            order
        });
        let min_height = options
            .min_height
            .filter(|value| value.is_finite() && *value >= 0.0)
            .unwrap_or(self.defaults.min_height);
        let height = options
            .height
            .filter(|value| value.is_finite() && *value > 0.0)
            .unwrap_or(self.defaults.height)
            .max(min_height);

        let mut pane = Pane::new(id.clone(), kind, order, height, min_height).with_axis(options.axis);
        pane.set_order(order);
        self.panes.insert(id.clone(), pane);
        Some(id)
    }

    fn generate_id(&mut self) -> PaneId {
        loop {
            let candidate = PaneId::new(format!("pane_{}", self.next_generated_id));
            self.next_generated_id = self.next_generated_id.saturating_add(1);
            if !self.panes.contains_key(&candidate) {
                return candidate;
            }
        }
    }

    /// Removes a content pane and its separator entry.
    pub fn remove_pane(&mut self, pane_id: &PaneId) -> Option<Pane> {
        if pane_id.is_reserved() {
            return None;
        }
        let removed = self.panes.shift_remove(pane_id)?;
        self.separators.shift_remove(pane_id);
        Some(removed)
    }

    #[must_use]
    pub fn pane(&self, pane_id: &PaneId) -> Option<&Pane> {
        self.panes.get(pane_id)
    }

    pub fn pane_mut(&mut self, pane_id: &PaneId) -> Option<&mut Pane> {
        self.panes.get_mut(pane_id)
    }

    #[must_use]
    pub fn contains(&self, pane_id: &PaneId) -> bool {
        self.panes.contains_key(pane_id)
    }

    #[must_use]
    pub fn candle(&self) -> Option<&Pane> {
        self.panes.get(&PaneId::candle())
    }

    #[must_use]
    pub fn time_axis(&self) -> Option<&Pane> {
        self.panes.get(&PaneId::time_axis())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.panes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.panes.is_empty()
    }

    /// Panes in their current order (sorted after the last resort).
    pub fn panes(&self) -> impl Iterator<Item = &Pane> {
        self.panes.values()
    }

    pub fn panes_mut(&mut self) -> impl Iterator<Item = &mut Pane> {
        self.panes.values_mut()
    }

    #[must_use]
    pub fn pane_ids(&self) -> Vec<PaneId> {
        self.panes.keys().cloned().collect()
    }

    #[must_use]
    pub fn separator(&self, pane_id: &PaneId) -> Option<&Separator> {
        self.separators.get(pane_id)
    }

    pub fn separator_mut(&mut self, pane_id: &PaneId) -> Option<&mut Separator> {
        self.separators.get_mut(pane_id)
    }

    pub fn separators(&self) -> impl Iterator<Item = &Separator> {
        self.separators.values()
    }

    /// Splits the borrow so layout code can update a pane and its separator
    /// together.
    pub(crate) fn pane_and_separator_mut(
        &mut self,
        index: usize,
    ) -> Option<(&mut Pane, Option<&mut Separator>)> {
        let (pane_id, pane) = self.panes.get_index_mut(index)?;
        let separator = self.separators.get_mut(pane_id);
        Some((pane, separator))
    }

    /// Stable sort by `order`, then rebuilds every separator.
    pub fn sort(&mut self) {
        self.panes.sort_by(|_, left, _, right| left.order().cmp(&right.order()));
        self.rebuild_separators();
    }

    #[must_use]
    pub fn is_sorted(&self) -> bool {
        self.panes
            .values()
            .zip(self.panes.values().skip(1))
            .all(|(above, below)| above.order() <= below.order())
    }

    fn rebuild_separators(&mut self) {
        self.separators.clear();
        let mut previous: Option<&PaneId> = None;
        for pane in self.panes.values() {
            if pane.kind() == PaneKind::TimeAxis {
                continue;
            }
            if let Some(top_pane_id) = previous {
                self.separators.insert(
                    pane.id().clone(),
                    Separator {
                        pane_id: pane.id().clone(),
                        top_pane_id: top_pane_id.clone(),
                        visible: true,
                        geometry: Bounding::default(),
                    },
                );
            }
            previous = Some(pane.id());
        }
    }

    /// Normal, non-time-axis panes other than `exclude`, in sorted order.
    #[must_use]
    pub fn normal_pane_ids_except(&self, exclude: &PaneId) -> Vec<PaneId> {
        self.panes
            .values()
            .filter(|pane| {
                pane.is_normal() && pane.kind() != PaneKind::TimeAxis && pane.id() != exclude
            })
            .map(|pane| pane.id().clone())
            .collect()
    }

    /// Number of content panes (everything except the time axis).
    #[must_use]
    pub fn content_pane_count(&self) -> usize {
        self.panes
            .values()
            .filter(|pane| pane.kind() != PaneKind::TimeAxis)
            .count()
    }
}

impl Default for PaneRegistry {
    fn default() -> Self {
        Self::new(PaneDefaults::default())
    }
}
