use wasm_bindgen::prelude::*;
use web_sys::CanvasRenderingContext2d;

use crate::core::Vec2;
use crate::domain::{Body, BodyId, BodyStore, Constraint, Material};
use crate::systems::BreakCallback;

use super::config::CollisionConfigPatch;
use super::perf_stats::PhysicsStats;
use super::CollisionWorld;

/// JS-facing world: a body mirror plus the collision core
///
/// Collections cross the boundary as JSON strings; body state as flat
/// `Float32Array`s.
#[wasm_bindgen]
pub struct PhysicsWorld {
    core: CollisionWorld,
    bodies: Vec<Body>,
    next_body_id: BodyId,
}

fn material_or_default(name: Option<String>) -> Material {
    match name.as_deref() {
        None => Material::default(),
        Some(n) => Material::preset(n).unwrap_or_else(|| {
            log_warn!("unknown material '{}', using stone", n);
            Material::default()
        }),
    }
}

fn to_json<T: serde::Serialize>(value: &T) -> String {
    serde_json::to_string(value).unwrap_or_else(|_| "[]".to_string())
}

impl PhysicsWorld {
    fn insert(&mut self, mut body: Body) -> BodyId {
        let id = self.next_body_id;
        self.next_body_id = self.next_body_id.wrapping_add(1).max(1);
        body.id = id;
        self.bodies.add_body(body)
    }
}

#[wasm_bindgen]
impl PhysicsWorld {
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Self {
            core: CollisionWorld::new(),
            bodies: Vec::new(),
            next_body_id: 1,
        }
    }

    /// Start from defaults with a partial config applied
    #[wasm_bindgen(js_name = withConfig)]
    pub fn with_config(json: String) -> Result<PhysicsWorld, JsValue> {
        let mut world = Self::new();
        world.update_config(json)?;
        Ok(world)
    }

    // === BODIES ===

    /// Returns the new body ID
    #[wasm_bindgen(js_name = addCircle)]
    pub fn add_circle(&mut self, x: f32, y: f32, radius: f32, material: Option<String>) -> u32 {
        self.insert(Body::circle(0, x, y, radius, material_or_default(material)))
    }

    #[wasm_bindgen(js_name = addRectangle)]
    pub fn add_rectangle(&mut self, x: f32, y: f32, width: f32, height: f32, material: Option<String>) -> u32 {
        self.insert(Body::rectangle(0, x, y, width, height, material_or_default(material)))
    }

    /// `vertices` is a flat [x0, y0, x1, y1, ...] list relative to (x, y)
    #[wasm_bindgen(js_name = addPolygon)]
    pub fn add_polygon(&mut self, x: f32, y: f32, vertices: Vec<f32>, material: Option<String>) -> u32 {
        let points = vertices.chunks_exact(2).map(|p| Vec2::new(p[0], p[1])).collect();
        self.insert(Body::polygon(0, x, y, points, material_or_default(material)))
    }

    /// Insert or replace a full body description; keeps its ID
    #[wasm_bindgen(js_name = addBodyJson)]
    pub fn add_body_json(&mut self, json: String) -> Result<u32, JsValue> {
        let body: Body = serde_json::from_str(&json).map_err(|e| JsValue::from_str(&e.to_string()))?;
        if body.id >= self.next_body_id {
            self.next_body_id = body.id.wrapping_add(1).max(1);
        }
        Ok(self.bodies.add_body(body))
    }

    /// Remove a body and every constraint attached to it
    #[wasm_bindgen(js_name = removeBody)]
    pub fn remove_body(&mut self, id: u32) -> bool {
        let removed = self.bodies.remove_body(id).is_some();
        if removed {
            self.core.remove_body_constraints(id);
        }
        removed
    }

    #[wasm_bindgen(js_name = setStatic)]
    pub fn set_static(&mut self, id: u32, is_static: bool) {
        match self.bodies.get_body_mut(id) {
            Some(body) => {
                body.is_static = is_static;
                if is_static {
                    body.velocity = Vec2::ZERO;
                    body.angular_velocity = 0.0;
                }
            }
            None => log_warn!("setStatic: unknown body {}", id),
        }
    }

    #[wasm_bindgen(js_name = setSleeping)]
    pub fn set_sleeping(&mut self, id: u32, sleeping: bool) {
        match self.bodies.get_body_mut(id) {
            Some(body) => body.is_sleeping = sleeping,
            None => log_warn!("setSleeping: unknown body {}", id),
        }
    }

    #[wasm_bindgen(js_name = setMass)]
    pub fn set_mass(&mut self, id: u32, mass: f32) {
        match self.bodies.get_body_mut(id) {
            Some(body) => body.mass = mass,
            None => log_warn!("setMass: unknown body {}", id),
        }
    }

    /// Write back integrator state for one body
    #[wasm_bindgen(js_name = setBodyState)]
    pub fn set_body_state(&mut self, id: u32, x: f32, y: f32, vx: f32, vy: f32, angle: f32, angular_velocity: f32) -> bool {
        match self.bodies.get_body_mut(id) {
            Some(body) => {
                body.position = Vec2::new(x, y);
                body.velocity = Vec2::new(vx, vy);
                body.angle = angle;
                body.angular_velocity = angular_velocity;
                true
            }
            None => {
                log_warn!("setBodyState: unknown body {}", id);
                false
            }
        }
    }

    /// [x, y, vx, vy, angle, angularVelocity]
    #[wasm_bindgen(js_name = bodyState)]
    pub fn body_state(&self, id: u32) -> Option<Vec<f32>> {
        self.bodies.get_body(id).map(|b| {
            vec![b.position.x, b.position.y, b.velocity.x, b.velocity.y, b.angle, b.angular_velocity]
        })
    }

    #[wasm_bindgen(js_name = bodyJson)]
    pub fn body_json(&self, id: u32) -> Option<String> {
        self.bodies.get_body(id).map(to_json)
    }

    #[wasm_bindgen(getter, js_name = bodyCount)]
    pub fn body_count(&self) -> usize {
        self.bodies.len()
    }

    // === COLLISIONS ===

    /// JSON array of collision events; bodies are left untouched
    #[wasm_bindgen(js_name = detectAllCollisions)]
    pub fn detect_all_collisions(&mut self) -> String {
        to_json(&self.core.detect_all_collisions(self.bodies.bodies()))
    }

    /// Detect and resolve; JSON array of collision events with impulses
    pub fn update(&mut self) -> String {
        to_json(&self.core.update(self.bodies.bodies_mut()))
    }

    /// Collisions then constraints; JSON `{ collisions, brokenConstraints }`
    pub fn step(&mut self, dt: Option<f32>) -> String {
        to_json(&self.core.step(self.bodies.bodies_mut(), dt))
    }

    // === CONFIG ===

    /// Merge a partial JSON config
    #[wasm_bindgen(js_name = updateConfig)]
    pub fn update_config(&mut self, json: String) -> Result<(), JsValue> {
        let patch = CollisionConfigPatch::from_json(&json).map_err(|e| JsValue::from_str(&e))?;
        self.core.update_config(patch);
        Ok(())
    }

    #[wasm_bindgen(js_name = getConfig)]
    pub fn get_config(&self) -> String {
        self.core.config_json()
    }

    #[wasm_bindgen(js_name = resetConfig)]
    pub fn reset_config(&mut self) {
        self.core.reset_config();
    }

    // === CONSTRAINTS ===

    /// Returns the constraint ID, or 0 when a referenced body is missing
    #[wasm_bindgen(js_name = createConstraint)]
    pub fn create_constraint(&mut self, json: String) -> Result<u32, JsValue> {
        let id = self
            .core
            .create_constraint_json(&json, self.bodies.bodies())
            .map_err(|e| JsValue::from_str(&e))?;
        Ok(id.unwrap_or(0))
    }

    #[wasm_bindgen(js_name = removeConstraint)]
    pub fn remove_constraint(&mut self, id: u32) -> bool {
        self.core.remove_constraint(id)
    }

    #[wasm_bindgen(js_name = clearConstraints)]
    pub fn clear_constraints(&mut self) {
        self.core.clear_constraints();
    }

    #[wasm_bindgen(js_name = getConstraint)]
    pub fn get_constraint(&self, id: u32) -> Option<String> {
        self.core.get_constraint(id).map(to_json)
    }

    #[wasm_bindgen(js_name = getConstraintState)]
    pub fn get_constraint_state(&self, id: u32) -> Option<String> {
        self.core.get_constraint_state(id).map(|s| to_json(&s))
    }

    /// Returns the IDs that broke during this pass
    #[wasm_bindgen(js_name = updateConstraints)]
    pub fn update_constraints(&mut self, dt: Option<f32>) -> Vec<u32> {
        self.core.update_constraints(self.bodies.bodies_mut(), dt)
    }

    /// `listener(id)` is called once per constraint when it breaks
    #[wasm_bindgen(js_name = setBreakListener)]
    pub fn set_break_listener(&mut self, listener: Option<js_sys::Function>) {
        let callback = listener.map(|f| {
            Box::new(move |c: &Constraint| {
                if let Err(e) = f.call1(&JsValue::NULL, &JsValue::from(c.id)) {
                    log_warn!("break listener threw: {:?}", e);
                }
            }) as BreakCallback
        });
        self.core.set_break_callback(callback);
    }

    // === STATS / DEBUG ===

    pub fn stats(&self) -> PhysicsStats {
        self.core.stats()
    }

    /// Draw constraints onto a 2D canvas context
    pub fn render(&self, ctx: &CanvasRenderingContext2d) {
        let mut surface = ctx.clone();
        self.core.render(self.bodies.bodies(), &mut surface);
    }
}

impl Default for PhysicsWorld {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_body_ids_are_no_ops() {
        let mut world = PhysicsWorld::new();
        let id = world.add_circle(0.0, 0.0, 10.0, None);
        let before = world.body_state(id);

        world.set_static(99, true);
        world.set_sleeping(99, true);
        world.set_mass(99, 5.0);
        assert!(!world.set_body_state(99, 1.0, 1.0, 1.0, 1.0, 0.0, 0.0));
        assert!(!world.remove_body(99));

        assert_eq!(world.body_count(), 1);
        assert_eq!(world.body_state(id), before);
        assert!(world.body_state(99).is_none());
    }

    #[test]
    fn setters_reach_the_mirrored_body() {
        let mut world = PhysicsWorld::new();
        let id = world.add_rectangle(0.0, 0.0, 20.0, 10.0, Some("wood".to_string()));
        assert!(world.set_body_state(id, 5.0, 6.0, 1.0, -1.0, 0.5, 2.0));
        world.set_static(id, true);

        assert_eq!(world.body_state(id), Some(vec![5.0, 6.0, 0.0, 0.0, 0.5, 0.0]));
        assert!(world.get_constraint(1).is_none());
    }
}
