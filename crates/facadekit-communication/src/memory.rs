//! In-memory drawing document.
//!
//! A self-contained [`DrawingClient`] holding model and paper space objects,
//! a layer table and a command log. It backs the offline document file and
//! the integration tests. Layer names are matched case-insensitively, and
//! assigning an unknown layer fails unless strict layers are switched off,
//! as in the host application.

use crate::drawing::{DrawingClient, LayerRef, ObjectId, Space};
use facadekit_core::{ring_area, DrawingError, DrawingResult, Point};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// The layer every document starts with and new objects are drawn on
pub const DEFAULT_LAYER: &str = "0";

/// Geometry and type-specific state of an object
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Entity {
    Line {
        start: Point,
        end: Point,
    },
    Polyline {
        vertices: Vec<Point>,
        closed: bool,
    },
    /// 3-D polyline; its closed flag is not reachable through the 2-D interface
    Polyline3d {
        vertices: Vec<Point>,
    },
    Circle {
        center: Point,
        radius: f64,
    },
    Text {
        value: String,
        position: Point,
    },
    Viewport {
        number: u32,
        custom_scale: f64,
        display_locked: bool,
    },
    PdfUnderlay {
        source: String,
    },
    RasterImage {
        source: String,
    },
}

impl Entity {
    /// Host object name for this entity
    pub fn object_name(&self) -> &'static str {
        match self {
            Entity::Line { .. } => "AcDbLine",
            Entity::Polyline { .. } => "AcDbPolyline",
            Entity::Polyline3d { .. } => "AcDb3dPolyline",
            Entity::Circle { .. } => "AcDbCircle",
            Entity::Text { .. } => "AcDbText",
            Entity::Viewport { .. } => "AcDbViewport",
            Entity::PdfUnderlay { .. } => "AcDbPdfReference",
            Entity::RasterImage { .. } => "AcDbRasterImage",
        }
    }

    /// A fresh viewport at 1:1, unlocked
    pub fn viewport(number: u32) -> Self {
        Entity::Viewport {
            number,
            custom_scale: 1.0,
            display_locked: false,
        }
    }
}

/// One object of the document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MemoryObject {
    pub handle: ObjectId,
    /// `None` when the object carries no readable layer
    pub layer: Option<String>,
    #[serde(default = "default_visible")]
    pub visible: bool,
    pub entity: Entity,
}

fn default_visible() -> bool {
    true
}

fn default_strict() -> bool {
    true
}

/// Layer table entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayerEntry {
    pub name: String,
    #[serde(default)]
    pub color: Option<u8>,
}

/// Document held entirely in memory
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MemoryDrawing {
    name: String,
    layers: Vec<LayerEntry>,
    model_space: Vec<MemoryObject>,
    paper_space: Vec<MemoryObject>,
    next_handle: u64,
    #[serde(default)]
    active_space: Space,
    #[serde(default = "default_strict")]
    strict_layers: bool,
    #[serde(skip)]
    command_log: Vec<String>,
    #[serde(skip)]
    regenerations: usize,
}

impl MemoryDrawing {
    /// Empty document with layer "0" and the sheet's background viewport
    pub fn new(name: impl Into<String>) -> Self {
        let mut drawing = Self {
            name: name.into(),
            layers: vec![LayerEntry {
                name: DEFAULT_LAYER.to_string(),
                color: Some(7),
            }],
            model_space: Vec::new(),
            paper_space: Vec::new(),
            next_handle: 0x20,
            active_space: Space::Model,
            strict_layers: true,
            command_log: Vec::new(),
            regenerations: 0,
        };
        drawing.insert(Space::Paper, Some(DEFAULT_LAYER), Entity::viewport(1));
        drawing
    }

    /// Allow assigning layers that are not in the layer table
    pub fn set_strict_layers(&mut self, strict: bool) {
        self.strict_layers = strict;
    }

    /// Place an object directly, bypassing layer checks
    pub fn insert(&mut self, space: Space, layer: Option<&str>, entity: Entity) -> ObjectId {
        let handle = ObjectId(self.next_handle);
        self.next_handle += 1;
        let object = MemoryObject {
            handle,
            layer: layer.map(str::to_string),
            visible: true,
            entity,
        };
        match space {
            Space::Model => self.model_space.push(object),
            Space::Paper => self.paper_space.push(object),
        }
        handle
    }

    /// Add a layer to the table if absent; returns the stored name
    pub fn add_layer(&mut self, name: &str) -> String {
        if let Some(existing) = self.find_layer(name) {
            return existing.name.clone();
        }
        self.layers.push(LayerEntry {
            name: name.to_string(),
            color: None,
        });
        name.to_string()
    }

    pub fn layer_names(&self) -> Vec<&str> {
        self.layers.iter().map(|l| l.name.as_str()).collect()
    }

    pub fn layer_color(&self, name: &str) -> Option<u8> {
        self.find_layer(name).and_then(|l| l.color)
    }

    pub fn object(&self, id: ObjectId) -> Option<&MemoryObject> {
        self.model_space
            .iter()
            .chain(self.paper_space.iter())
            .find(|o| o.handle == id)
    }

    pub fn entity(&self, id: ObjectId) -> Option<&Entity> {
        self.object(id).map(|o| &o.entity)
    }

    pub fn space_objects(&self, space: Space) -> &[MemoryObject] {
        match space {
            Space::Model => &self.model_space,
            Space::Paper => &self.paper_space,
        }
    }

    /// Model space objects on a layer, matched case-insensitively
    pub fn objects_on_layer(&self, layer: &str) -> Vec<&MemoryObject> {
        self.model_space
            .iter()
            .filter(|o| {
                o.layer
                    .as_deref()
                    .is_some_and(|l| l.eq_ignore_ascii_case(layer))
            })
            .collect()
    }

    pub fn command_log(&self) -> &[String] {
        &self.command_log
    }

    pub fn regenerations(&self) -> usize {
        self.regenerations
    }

    pub fn active_space(&self) -> Space {
        self.active_space
    }

    fn find_layer(&self, name: &str) -> Option<&LayerEntry> {
        self.layers
            .iter()
            .find(|l| l.name.eq_ignore_ascii_case(name))
    }

    fn find(&self, id: ObjectId) -> DrawingResult<&MemoryObject> {
        self.object(id).ok_or_else(|| DrawingError::not_found(id))
    }

    fn find_mut(&mut self, id: ObjectId) -> DrawingResult<&mut MemoryObject> {
        self.model_space
            .iter_mut()
            .chain(self.paper_space.iter_mut())
            .find(|o| o.handle == id)
            .ok_or_else(|| DrawingError::not_found(id))
    }

    /// Merge touching lines on the same layer into open polylines.
    ///
    /// Returns the number of polylines created. A chain that returns to its
    /// start keeps the repeated vertex and stays open.
    fn join_lines(&mut self) -> usize {
        let lines: Vec<(ObjectId, Option<String>, Point, Point)> = self
            .model_space
            .iter()
            .filter_map(|o| match o.entity {
                Entity::Line { start, end } => Some((o.handle, o.layer.clone(), start, end)),
                _ => None,
            })
            .collect();

        let same_layer = |a: &Option<String>, b: &Option<String>| match (a, b) {
            (Some(a), Some(b)) => a.eq_ignore_ascii_case(b),
            (None, None) => true,
            _ => false,
        };

        let mut used = vec![false; lines.len()];
        let mut chains: Vec<(Option<String>, Vec<ObjectId>, Vec<Point>)> = Vec::new();

        for i in 0..lines.len() {
            if used[i] {
                continue;
            }
            used[i] = true;
            let (id, layer, start, end) = &lines[i];
            let mut vertices = VecDeque::from([*start, *end]);
            let mut members = vec![*id];

            loop {
                let mut extended = false;
                for j in 0..lines.len() {
                    let head = vertices[0];
                    let tail = vertices[vertices.len() - 1];
                    if vertices.len() > 2 && head == tail {
                        break;
                    }
                    if used[j] || !same_layer(layer, &lines[j].1) {
                        continue;
                    }
                    let (other, _, a, b) = &lines[j];
                    if *a == tail {
                        vertices.push_back(*b);
                    } else if *b == tail {
                        vertices.push_back(*a);
                    } else if *b == head {
                        vertices.push_front(*a);
                    } else if *a == head {
                        vertices.push_front(*b);
                    } else {
                        continue;
                    }
                    used[j] = true;
                    members.push(*other);
                    extended = true;
                }
                if !extended {
                    break;
                }
            }

            if members.len() > 1 {
                chains.push((layer.clone(), members, vertices.into_iter().collect()));
            }
        }

        for (layer, members, vertices) in &chains {
            self.model_space.retain(|o| !members.contains(&o.handle));
            self.insert(
                Space::Model,
                layer.as_deref(),
                Entity::Polyline {
                    vertices: vertices.clone(),
                    closed: false,
                },
            );
        }

        chains.len()
    }
}

impl DrawingClient for MemoryDrawing {
    fn document_name(&self) -> String {
        self.name.clone()
    }

    fn objects(&self, space: Space) -> DrawingResult<Vec<ObjectId>> {
        Ok(self.space_objects(space).iter().map(|o| o.handle).collect())
    }

    fn object_count(&self, space: Space) -> DrawingResult<usize> {
        Ok(self.space_objects(space).len())
    }

    fn object_at(&self, space: Space, index: usize) -> DrawingResult<ObjectId> {
        self.space_objects(space)
            .get(index)
            .map(|o| o.handle)
            .ok_or_else(|| DrawingError::not_found(format!("{} index {}", space, index)))
    }

    fn object_name(&self, id: ObjectId) -> DrawingResult<String> {
        Ok(self.find(id)?.entity.object_name().to_string())
    }

    fn layer(&self, id: ObjectId) -> DrawingResult<String> {
        self.find(id)?
            .layer
            .clone()
            .ok_or_else(|| DrawingError::property(id, "Layer"))
    }

    fn set_layer(&mut self, id: ObjectId, layer: &str) -> DrawingResult<()> {
        let stored = match self.find_layer(layer) {
            Some(entry) => entry.name.clone(),
            None if self.strict_layers => {
                return Err(DrawingError::LayerNotFound {
                    layer: layer.to_string(),
                })
            }
            None => layer.to_string(),
        };
        let object = self.find_mut(id)?;
        if object.layer.is_none() {
            return Err(DrawingError::property(id, "Layer"));
        }
        object.layer = Some(stored);
        Ok(())
    }

    fn is_closed(&self, id: ObjectId) -> DrawingResult<bool> {
        match &self.find(id)?.entity {
            Entity::Polyline { closed, .. } => Ok(*closed),
            Entity::Polyline3d { .. } => Err(DrawingError::unsupported(id, "Closed")),
            _ => Err(DrawingError::property(id, "Closed")),
        }
    }

    fn set_closed(&mut self, id: ObjectId, closed: bool) -> DrawingResult<()> {
        let object = self.find_mut(id)?;
        match &mut object.entity {
            Entity::Polyline {
                vertices,
                closed: flag,
            } => {
                if closed && vertices.len() > 2 && vertices.first() == vertices.last() {
                    vertices.pop();
                }
                *flag = closed;
                Ok(())
            }
            Entity::Polyline3d { .. } => Err(DrawingError::unsupported(id, "Closed")),
            _ => Err(DrawingError::property(id, "Closed")),
        }
    }

    fn is_visible(&self, id: ObjectId) -> DrawingResult<bool> {
        Ok(self.find(id)?.visible)
    }

    fn set_visible(&mut self, id: ObjectId, visible: bool) -> DrawingResult<()> {
        self.find_mut(id)?.visible = visible;
        Ok(())
    }

    fn area(&self, id: ObjectId) -> DrawingResult<f64> {
        match &self.find(id)?.entity {
            Entity::Polyline { vertices, .. } => Ok(ring_area(vertices)),
            Entity::Circle { radius, .. } => Ok(std::f64::consts::PI * radius * radius),
            _ => Err(DrawingError::property(id, "Area")),
        }
    }

    fn viewport_number(&self, id: ObjectId) -> DrawingResult<u32> {
        match &self.find(id)?.entity {
            Entity::Viewport { number, .. } => Ok(*number),
            _ => Err(DrawingError::property(id, "Number")),
        }
    }

    fn set_custom_scale(&mut self, id: ObjectId, scale: f64) -> DrawingResult<()> {
        match &mut self.find_mut(id)?.entity {
            Entity::Viewport { custom_scale, .. } => {
                *custom_scale = scale;
                Ok(())
            }
            _ => Err(DrawingError::property(id, "CustomScale")),
        }
    }

    fn set_display_locked(&mut self, id: ObjectId, locked: bool) -> DrawingResult<()> {
        match &mut self.find_mut(id)?.entity {
            Entity::Viewport { display_locked, .. } => {
                *display_locked = locked;
                Ok(())
            }
            _ => Err(DrawingError::property(id, "DisplayLocked")),
        }
    }

    fn add_line(&mut self, start: Point, end: Point) -> DrawingResult<ObjectId> {
        Ok(self.insert(Space::Model, Some(DEFAULT_LAYER), Entity::Line { start, end }))
    }

    fn delete(&mut self, id: ObjectId) -> DrawingResult<()> {
        let before = self.model_space.len() + self.paper_space.len();
        self.model_space.retain(|o| o.handle != id);
        self.paper_space.retain(|o| o.handle != id);
        if self.model_space.len() + self.paper_space.len() == before {
            return Err(DrawingError::not_found(id));
        }
        Ok(())
    }

    fn send_command(&mut self, command: &str) -> DrawingResult<()> {
        self.command_log.push(command.to_string());
        let upper = command.to_uppercase();
        if upper.contains("JOIN") {
            let joined = self.join_lines();
            tracing::debug!(polylines = joined, "Joined touching lines");
        } else if upper.contains("REGEN") {
            self.regenerations += 1;
        }
        Ok(())
    }

    fn ensure_layer(&mut self, name: &str) -> DrawingResult<LayerRef> {
        if name.trim().is_empty() {
            return Err(DrawingError::CommandRejected {
                reason: "layer name is empty".to_string(),
            });
        }
        let created = self.find_layer(name).is_none();
        let name = self.add_layer(name);
        Ok(LayerRef { name, created })
    }

    fn set_layer_color(&mut self, name: &str, color: u8) -> DrawingResult<()> {
        let entry = self
            .layers
            .iter_mut()
            .find(|l| l.name.eq_ignore_ascii_case(name))
            .ok_or_else(|| DrawingError::LayerNotFound {
                layer: name.to_string(),
            })?;
        entry.color = Some(color);
        Ok(())
    }

    fn set_active_space(&mut self, space: Space) -> DrawingResult<()> {
        self.active_space = space;
        Ok(())
    }

    fn regenerate(&mut self) -> DrawingResult<()> {
        self.regenerations += 1;
        Ok(())
    }

    fn bulk_operation_pending(&self) -> Option<bool> {
        Some(false)
    }
}
