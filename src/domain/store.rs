use super::body::{Body, BodyId};

/// Body registry owned by the rigid-body engine
///
/// The collision core only consumes this interface. `Vec<Body>` implements it
/// as the plain mirror used by the WASM facade and by tests.
pub trait BodyStore {
    /// Insert a body, replacing any body with the same id. Returns the id.
    fn add_body(&mut self, body: Body) -> BodyId;
    fn remove_body(&mut self, id: BodyId) -> Option<Body>;
    fn get_body(&self, id: BodyId) -> Option<&Body>;
    fn get_body_mut(&mut self, id: BodyId) -> Option<&mut Body>;
    fn bodies(&self) -> &[Body];
    fn bodies_mut(&mut self) -> &mut [Body];
}

impl BodyStore for Vec<Body> {
    fn add_body(&mut self, body: Body) -> BodyId {
        let id = body.id;
        match self.iter().position(|b| b.id == id) {
            Some(idx) => self[idx] = body,
            None => self.push(body),
        }
        id
    }

    fn remove_body(&mut self, id: BodyId) -> Option<Body> {
        let idx = self.iter().position(|b| b.id == id)?;
        Some(self.swap_remove(idx))
    }

    fn get_body(&self, id: BodyId) -> Option<&Body> {
        self.iter().find(|b| b.id == id)
    }

    fn get_body_mut(&mut self, id: BodyId) -> Option<&mut Body> {
        self.iter_mut().find(|b| b.id == id)
    }

    fn bodies(&self) -> &[Body] {
        self.as_slice()
    }

    fn bodies_mut(&mut self) -> &mut [Body] {
        self.as_mut_slice()
    }
}
