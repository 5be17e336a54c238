use std::collections::HashMap;

/// Name-keyed memo of attribute slots and uniform handles.
///
/// Only successful lookups are stored, so a miss is re-queried next time.
/// Entries belong to one program; the owner clears the cache whenever a
/// different program becomes active.
#[derive(Debug)]
pub struct LocationCache<U> {
    attributes: HashMap<String, u32>,
    uniforms: HashMap<String, U>,
}

impl<U> Default for LocationCache<U> {
    fn default() -> Self {
        Self {
            attributes: HashMap::new(),
            uniforms: HashMap::new(),
        }
    }
}

impl<U: Clone> LocationCache<U> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the cached slot for `name`, or runs `lookup` and caches a hit.
    ///
    /// Slot 0 is a valid, cached result.
    pub fn attribute(&mut self, name: &str, lookup: impl FnOnce(&str) -> Option<u32>) -> Option<u32> {
        if let Some(&slot) = self.attributes.get(name) {
            log::trace!("attribute `{name}` cache hit: {slot}");
            return Some(slot);
        }

        let slot = lookup(name)?;
        self.attributes.insert(name.to_owned(), slot);
        Some(slot)
    }

    /// Same contract as [`attribute`](Self::attribute) for uniform handles.
    pub fn uniform(&mut self, name: &str, lookup: impl FnOnce(&str) -> Option<U>) -> Option<U> {
        if let Some(location) = self.uniforms.get(name) {
            log::trace!("uniform `{name}` cache hit");
            return Some(location.clone());
        }

        let location = lookup(name)?;
        self.uniforms.insert(name.to_owned(), location.clone());
        Some(location)
    }

    pub fn cached_attribute(&self, name: &str) -> Option<u32> {
        self.attributes.get(name).copied()
    }

    pub fn cached_uniform(&self, name: &str) -> Option<&U> {
        self.uniforms.get(name)
    }

    /// Number of cached entries, attributes plus uniforms.
    pub fn len(&self) -> usize {
        self.attributes.len() + self.uniforms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&mut self) {
        self.attributes.clear();
        self.uniforms.clear();
    }
}
