//! Shared test fixtures: a document wrapper that injects failures.

#![allow(dead_code)]

use facadekit_communication::{DrawingClient, LayerRef, MemoryDrawing, ObjectId, Space};
use facadekit_core::{ConnectionError, DrawingError, DrawingResult, Point};
use std::cell::Cell;
use std::collections::{HashMap, HashSet};

#[derive(Default)]
pub struct Faults {
    /// Object names reported in place of the stored ones
    pub object_names: HashMap<ObjectId, String>,
    /// Objects whose layer cannot be read
    pub unreadable_layer: HashSet<ObjectId>,
    /// Every layer assignment is refused
    pub reject_set_layer: bool,
    /// Layer reads report a dropped connection
    pub connection_lost: bool,
    /// Viewports whose number cannot be read
    pub unreadable_number: HashSet<ObjectId>,
    /// Objects that refuse a custom scale
    pub fixed_scale: HashSet<ObjectId>,
    /// Scan indices that report a vanished object
    pub vanished_indices: HashSet<usize>,
    /// Number of polls reporting the join as still running
    pub pending_polls: Cell<usize>,
    /// Hide the completion signal entirely
    pub no_completion_signal: bool,
    /// Layer colours are refused
    pub reject_layer_color: bool,
}

pub struct FaultyDrawing {
    pub inner: MemoryDrawing,
    pub faults: Faults,
}

impl FaultyDrawing {
    pub fn new(inner: MemoryDrawing) -> Self {
        Self {
            inner,
            faults: Faults::default(),
        }
    }
}

impl DrawingClient for FaultyDrawing {
    fn document_name(&self) -> String {
        self.inner.document_name()
    }

    fn objects(&self, space: Space) -> DrawingResult<Vec<ObjectId>> {
        self.inner.objects(space)
    }

    fn object_count(&self, space: Space) -> DrawingResult<usize> {
        self.inner.object_count(space)
    }

    fn object_at(&self, space: Space, index: usize) -> DrawingResult<ObjectId> {
        if self.faults.vanished_indices.contains(&index) {
            return Err(DrawingError::not_found(index));
        }
        self.inner.object_at(space, index)
    }

    fn object_name(&self, id: ObjectId) -> DrawingResult<String> {
        if let Some(name) = self.faults.object_names.get(&id) {
            return Ok(name.clone());
        }
        self.inner.object_name(id)
    }

    fn layer(&self, id: ObjectId) -> DrawingResult<String> {
        if self.faults.connection_lost {
            return Err(DrawingError::Connection(ConnectionError::DocumentUnavailable {
                reason: "document closed".to_string(),
            }));
        }
        if self.faults.unreadable_layer.contains(&id) {
            return Err(DrawingError::property(id, "Layer"));
        }
        self.inner.layer(id)
    }

    fn set_layer(&mut self, id: ObjectId, layer: &str) -> DrawingResult<()> {
        if self.faults.reject_set_layer {
            return Err(DrawingError::CommandRejected {
                reason: "layer is locked".to_string(),
            });
        }
        self.inner.set_layer(id, layer)
    }

    fn is_closed(&self, id: ObjectId) -> DrawingResult<bool> {
        self.inner.is_closed(id)
    }

    fn set_closed(&mut self, id: ObjectId, closed: bool) -> DrawingResult<()> {
        self.inner.set_closed(id, closed)
    }

    fn is_visible(&self, id: ObjectId) -> DrawingResult<bool> {
        self.inner.is_visible(id)
    }

    fn set_visible(&mut self, id: ObjectId, visible: bool) -> DrawingResult<()> {
        self.inner.set_visible(id, visible)
    }

    fn area(&self, id: ObjectId) -> DrawingResult<f64> {
        self.inner.area(id)
    }

    fn viewport_number(&self, id: ObjectId) -> DrawingResult<u32> {
        if self.faults.unreadable_number.contains(&id) {
            return Err(DrawingError::property(id, "Number"));
        }
        self.inner.viewport_number(id)
    }

    fn set_custom_scale(&mut self, id: ObjectId, scale: f64) -> DrawingResult<()> {
        if self.faults.fixed_scale.contains(&id) {
            return Err(DrawingError::unsupported(id, "CustomScale"));
        }
        self.inner.set_custom_scale(id, scale)
    }

    fn set_display_locked(&mut self, id: ObjectId, locked: bool) -> DrawingResult<()> {
        self.inner.set_display_locked(id, locked)
    }

    fn add_line(&mut self, start: Point, end: Point) -> DrawingResult<ObjectId> {
        self.inner.add_line(start, end)
    }

    fn delete(&mut self, id: ObjectId) -> DrawingResult<()> {
        self.inner.delete(id)
    }

    fn send_command(&mut self, command: &str) -> DrawingResult<()> {
        self.inner.send_command(command)
    }

    fn ensure_layer(&mut self, name: &str) -> DrawingResult<LayerRef> {
        self.inner.ensure_layer(name)
    }

    fn set_layer_color(&mut self, name: &str, color: u8) -> DrawingResult<()> {
        if self.faults.reject_layer_color {
            return Err(DrawingError::CommandRejected {
                reason: "colour table is read-only".to_string(),
            });
        }
        self.inner.set_layer_color(name, color)
    }

    fn set_active_space(&mut self, space: Space) -> DrawingResult<()> {
        self.inner.set_active_space(space)
    }

    fn regenerate(&mut self) -> DrawingResult<()> {
        self.inner.regenerate()
    }

    fn bulk_operation_pending(&self) -> Option<bool> {
        if self.faults.no_completion_signal {
            return None;
        }
        let remaining = self.faults.pending_polls.get();
        if remaining > 0 {
            self.faults.pending_polls.set(remaining - 1);
            return Some(true);
        }
        Some(false)
    }
}
