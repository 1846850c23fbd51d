//! Object model for Spindle.
//!
//! Provides the base object system with:
//! - Unique object identifiers via arena-based storage
//! - Parent-child ownership relationships with automatic drop cascade
//! - Object naming and lookup
//!
//! # Key Types
//!
//! - [`Object`] - Base trait that all objects implement
//! - [`ObjectBase`] - Helper struct for implementing [`Object`]
//! - [`ObjectId`] - Unique stable identifier for each object
//! - [`ObjectRegistry`] - Central registry managing all objects
//! - [`SharedObjectRegistry`] - Thread-safe wrapper around [`ObjectRegistry`]
//!
//! # Related Modules
//!
//! - [`crate::Signal`] - Objects typically contain signals

use std::any::{Any, TypeId};
use std::fmt;
use std::sync::OnceLock;

use parking_lot::RwLock;
use slotmap::{SlotMap, new_key_type};

new_key_type! {
    /// A unique identifier for an object in the registry.
    ///
    /// `ObjectId`s are stable handles that remain valid even as the object tree changes.
    /// They become invalid when the object is destroyed.
    ///
    /// # Related Types
    ///
    /// - [`Object`] - Trait that provides [`object_id()`](Object::object_id)
    /// - [`ObjectBase`] - Generates an `ObjectId` on construction
    /// - [`ObjectRegistry`] - Manages the mapping from `ObjectId` to object data
    pub struct ObjectId;
}

impl ObjectId {
    /// Convert the ObjectId to a raw u64 value.
    ///
    /// This is useful for interop with external systems that need a numeric ID.
    /// The raw value can be converted back using [`ObjectId::from_raw`].
    #[inline]
    pub fn as_raw(self) -> u64 {
        use slotmap::Key;
        self.data().as_ffi()
    }

    /// Create an ObjectId from a raw u64 value.
    ///
    /// Note: This does not check if the ObjectId exists in the registry.
    #[inline]
    pub fn from_raw(raw: u64) -> Self {
        Self::from(slotmap::KeyData::from_ffi(raw))
    }
}

/// Errors that can occur during object operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ObjectError {
    /// The object ID is invalid or has been destroyed.
    InvalidObjectId,
    /// Attempted to set an object as its own parent/ancestor.
    CircularParentage,
    /// The object registry is not initialized.
    RegistryNotInitialized,
}

impl fmt::Display for ObjectError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidObjectId => write!(f, "Invalid or destroyed object ID"),
            Self::CircularParentage => {
                write!(f, "Cannot set an object as its own parent or ancestor")
            }
            Self::RegistryNotInitialized => write!(f, "Object registry not initialized"),
        }
    }
}

impl std::error::Error for ObjectError {}

/// Result type for object operations.
pub type ObjectResult<T> = std::result::Result<T, ObjectError>;

/// Internal data stored in the registry for each object.
struct ObjectData {
    /// Human-readable name for debugging and lookup.
    name: String,
    /// The type ID of the concrete Object implementation.
    type_id: TypeId,
    /// The type name for debugging.
    type_name: &'static str,
    /// Parent object (if any).
    parent: Option<ObjectId>,
    /// Child objects (owned).
    children: Vec<ObjectId>,
}

impl ObjectData {
    fn new(type_id: TypeId, type_name: &'static str) -> Self {
        Self {
            name: String::new(),
            type_id,
            type_name,
            parent: None,
            children: Vec::new(),
        }
    }
}

/// The central registry that manages all objects and their relationships.
///
/// Uses arena-based storage via SlotMap for stable object IDs and efficient
/// parent-child relationship management.
///
/// # Related Types
///
/// - [`SharedObjectRegistry`] - Thread-safe wrapper for concurrent access
/// - [`ObjectId`] - Keys into this registry
/// - [`ObjectBase`] - Automatically registers objects here
/// - [`global_registry`] - Access the singleton instance
pub struct ObjectRegistry {
    objects: SlotMap<ObjectId, ObjectData>,
}

impl ObjectRegistry {
    /// Create a new empty object registry.
    pub fn new() -> Self {
        Self {
            objects: SlotMap::with_key(),
        }
    }

    /// Register a new object and return its ID.
    pub fn register<T: Object + 'static>(&mut self) -> ObjectId {
        let data = ObjectData::new(TypeId::of::<T>(), std::any::type_name::<T>());
        let id = self.objects.insert(data);
        tracing::trace!(target: "spindle_core::object", ?id, type_name = std::any::type_name::<T>(), "registered object");
        id
    }

    /// Remove an object and all its children from the registry.
    ///
    /// Destroying a parent also destroys all of its descendants.
    pub fn destroy(&mut self, id: ObjectId) -> ObjectResult<()> {
        let descendants = self.collect_descendants(id)?;
        tracing::trace!(target: "spindle_core::object", ?id, descendant_count = descendants.len(), "destroying object tree");

        // Remove from parent's children list.
        if let Some(data) = self.objects.get(id) {
            if let Some(parent_id) = data.parent {
                if let Some(parent_data) = self.objects.get_mut(parent_id) {
                    parent_data.children.retain(|&child| child != id);
                }
            }
        }

        for child_id in descendants {
            self.objects.remove(child_id);
        }
        self.objects.remove(id);

        Ok(())
    }

    /// Collect all descendant IDs in depth-first order (children before parents).
    fn collect_descendants(&self, id: ObjectId) -> ObjectResult<Vec<ObjectId>> {
        let mut result = Vec::new();
        self.collect_descendants_recursive(id, &mut result)?;
        Ok(result)
    }

    fn collect_descendants_recursive(
        &self,
        id: ObjectId,
        result: &mut Vec<ObjectId>,
    ) -> ObjectResult<()> {
        let data = self.objects.get(id).ok_or(ObjectError::InvalidObjectId)?;
        for &child_id in &data.children {
            self.collect_descendants_recursive(child_id, result)?;
            result.push(child_id);
        }
        Ok(())
    }

    /// Check if an object exists in the registry.
    pub fn contains(&self, id: ObjectId) -> bool {
        self.objects.contains_key(id)
    }

    /// Set the parent of an object.
    ///
    /// This handles removing from the old parent and adding to the new parent.
    /// Passing `None` makes the object a root object.
    pub fn set_parent(&mut self, id: ObjectId, new_parent: Option<ObjectId>) -> ObjectResult<()> {
        if !self.objects.contains_key(id) {
            return Err(ObjectError::InvalidObjectId);
        }

        if let Some(parent_id) = new_parent {
            if !self.objects.contains_key(parent_id) {
                return Err(ObjectError::InvalidObjectId);
            }
            if self.is_ancestor_of(id, parent_id)? {
                return Err(ObjectError::CircularParentage);
            }
        }

        // Remove from old parent.
        let old_parent = self.objects.get(id).and_then(|d| d.parent);
        if let Some(old_parent_id) = old_parent {
            if let Some(parent_data) = self.objects.get_mut(old_parent_id) {
                parent_data.children.retain(|&child| child != id);
            }
        }

        if let Some(data) = self.objects.get_mut(id) {
            data.parent = new_parent;
        }

        // Add to new parent's children.
        if let Some(parent_id) = new_parent {
            if let Some(parent_data) = self.objects.get_mut(parent_id) {
                parent_data.children.push(id);
            }
        }

        Ok(())
    }

    /// Check if `potential_ancestor` is an ancestor of `id`.
    fn is_ancestor_of(&self, potential_ancestor: ObjectId, id: ObjectId) -> ObjectResult<bool> {
        let mut current = Some(id);
        while let Some(current_id) = current {
            if current_id == potential_ancestor {
                return Ok(true);
            }
            current = self.objects.get(current_id).and_then(|d| d.parent);
        }
        Ok(false)
    }

    /// Get the parent of an object.
    pub fn parent(&self, id: ObjectId) -> ObjectResult<Option<ObjectId>> {
        self.objects
            .get(id)
            .map(|d| d.parent)
            .ok_or(ObjectError::InvalidObjectId)
    }

    /// Get the children of an object.
    pub fn children(&self, id: ObjectId) -> ObjectResult<&[ObjectId]> {
        self.objects
            .get(id)
            .map(|d| d.children.as_slice())
            .ok_or(ObjectError::InvalidObjectId)
    }

    /// Get the object's name.
    pub fn object_name(&self, id: ObjectId) -> ObjectResult<&str> {
        self.objects
            .get(id)
            .map(|d| d.name.as_str())
            .ok_or(ObjectError::InvalidObjectId)
    }

    /// Set the object's name.
    pub fn set_object_name(&mut self, id: ObjectId, name: String) -> ObjectResult<()> {
        self.objects
            .get_mut(id)
            .map(|d| d.name = name)
            .ok_or(ObjectError::InvalidObjectId)
    }

    /// Get the type ID of an object.
    pub fn type_id(&self, id: ObjectId) -> ObjectResult<TypeId> {
        self.objects
            .get(id)
            .map(|d| d.type_id)
            .ok_or(ObjectError::InvalidObjectId)
    }

    /// Get the type name of an object.
    pub fn type_name(&self, id: ObjectId) -> ObjectResult<&'static str> {
        self.objects
            .get(id)
            .map(|d| d.type_name)
            .ok_or(ObjectError::InvalidObjectId)
    }

    /// Find a child by name (direct children only).
    pub fn find_child_by_name(&self, id: ObjectId, name: &str) -> ObjectResult<Option<ObjectId>> {
        let children = self.children(id)?;
        for &child_id in children {
            if let Some(data) = self.objects.get(child_id) {
                if data.name == name {
                    return Ok(Some(child_id));
                }
            }
        }
        Ok(None)
    }

    /// Get the number of registered objects.
    pub fn object_count(&self) -> usize {
        self.objects.len()
    }

    /// Iterate over all root objects (objects with no parent).
    pub fn root_objects(&self) -> impl Iterator<Item = ObjectId> + '_ {
        self.objects
            .iter()
            .filter(|(_, data)| data.parent.is_none())
            .map(|(id, _)| id)
    }

    /// Debug dump of the object tree.
    pub fn dump_object_tree(&self, id: ObjectId) -> ObjectResult<String> {
        let mut output = String::new();
        self.dump_object_tree_recursive(id, 0, &mut output)?;
        Ok(output)
    }

    fn dump_object_tree_recursive(
        &self,
        id: ObjectId,
        depth: usize,
        output: &mut String,
    ) -> ObjectResult<()> {
        let data = self.objects.get(id).ok_or(ObjectError::InvalidObjectId)?;
        let indent = "  ".repeat(depth);
        let name_display = if data.name.is_empty() {
            "(unnamed)"
        } else {
            &data.name
        };
        output.push_str(&format!(
            "{}[{:?}] {} ({})\n",
            indent, id, name_display, data.type_name
        ));
        for &child_id in &data.children {
            self.dump_object_tree_recursive(child_id, depth + 1, output)?;
        }
        Ok(())
    }
}

impl Default for ObjectRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// A thread-safe wrapper around [`ObjectRegistry`].
///
/// Provides concurrent read access with exclusive write access via `RwLock`.
///
/// # Related
///
/// - [`ObjectRegistry`] - The underlying registry
/// - [`global_registry`] - Returns a `SharedObjectRegistry`
pub struct SharedObjectRegistry {
    inner: RwLock<ObjectRegistry>,
}

impl SharedObjectRegistry {
    /// Create a new shared object registry.
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(ObjectRegistry::new()),
        }
    }

    /// Register a new object.
    pub fn register<T: Object + 'static>(&self) -> ObjectId {
        self.inner.write().register::<T>()
    }

    /// Destroy an object and its children.
    pub fn destroy(&self, id: ObjectId) -> ObjectResult<()> {
        self.inner.write().destroy(id)
    }

    /// Check if an object exists.
    pub fn contains(&self, id: ObjectId) -> bool {
        self.inner.read().contains(id)
    }

    /// Set the parent of an object.
    pub fn set_parent(&self, id: ObjectId, parent: Option<ObjectId>) -> ObjectResult<()> {
        self.inner.write().set_parent(id, parent)
    }

    /// Get the parent of an object.
    pub fn parent(&self, id: ObjectId) -> ObjectResult<Option<ObjectId>> {
        self.inner.read().parent(id)
    }

    /// Get the children of an object (returns owned Vec for thread safety).
    pub fn children(&self, id: ObjectId) -> ObjectResult<Vec<ObjectId>> {
        self.inner.read().children(id).map(|c| c.to_vec())
    }

    /// Get the object's name.
    pub fn object_name(&self, id: ObjectId) -> ObjectResult<String> {
        self.inner.read().object_name(id).map(|s| s.to_string())
    }

    /// Set the object's name.
    pub fn set_object_name(&self, id: ObjectId, name: String) -> ObjectResult<()> {
        self.inner.write().set_object_name(id, name)
    }

    /// Get the type name of an object.
    pub fn type_name(&self, id: ObjectId) -> ObjectResult<&'static str> {
        self.with_read(|r| r.type_name(id))
    }

    /// Find a child by name.
    pub fn find_child_by_name(&self, id: ObjectId, name: &str) -> ObjectResult<Option<ObjectId>> {
        self.inner.read().find_child_by_name(id, name)
    }

    /// Get the number of registered objects.
    pub fn object_count(&self) -> usize {
        self.inner.read().object_count()
    }

    /// Get all root objects.
    pub fn root_objects(&self) -> Vec<ObjectId> {
        self.inner.read().root_objects().collect()
    }

    /// Access the registry with a read lock for complex operations.
    pub fn with_read<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&ObjectRegistry) -> R,
    {
        f(&self.inner.read())
    }

    /// Access the registry with a write lock for complex operations.
    pub fn with_write<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut ObjectRegistry) -> R,
    {
        f(&mut self.inner.write())
    }
}

impl Default for SharedObjectRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Global object registry (lazy initialized).
static GLOBAL_REGISTRY: OnceLock<SharedObjectRegistry> = OnceLock::new();

/// Initialize the global object registry.
///
/// Safe to call more than once; later calls are no-ops.
pub fn init_global_registry() {
    if GLOBAL_REGISTRY.set(SharedObjectRegistry::new()).is_ok() {
        crate::spindle_debug!("global object registry initialized");
    }
}

/// Get a reference to the global object registry.
///
/// Returns an error if the registry hasn't been initialized.
pub fn global_registry() -> ObjectResult<&'static SharedObjectRegistry> {
    GLOBAL_REGISTRY
        .get()
        .ok_or(ObjectError::RegistryNotInitialized)
}

/// The base trait that all objects must implement.
///
/// Types implementing this trait can participate in the object tree, be looked
/// up by name, and support signals/slots through the [`Signal`](crate::Signal)
/// system.
///
/// # Related Types
///
/// - [`ObjectBase`] - Helper for implementing this trait
/// - [`ObjectId`] - Returned by [`object_id()`](Self::object_id)
///
/// # Example
///
/// ```
/// use spindle_core::{Object, ObjectId, ObjectBase, init_global_registry};
///
/// // Initialize the registry before creating objects
/// init_global_registry();
///
/// struct MyWidget {
///     base: ObjectBase,
///     title: String,
/// }
///
/// impl MyWidget {
///     fn new(title: &str) -> Self {
///         Self {
///             base: ObjectBase::new::<Self>(),
///             title: title.to_string(),
///         }
///     }
/// }
///
/// impl Object for MyWidget {
///     fn object_id(&self) -> ObjectId {
///         self.base.id()
///     }
/// }
///
/// let widget = MyWidget::new("Hello");
/// assert_eq!(widget.title, "Hello");
/// ```
pub trait Object: Any + Send + Sync {
    /// Get this object's unique identifier.
    fn object_id(&self) -> ObjectId;
}

/// Helper for implementing the [`Object`] trait.
///
/// Include this as a field in your object types to handle registration
/// and provide the object ID. On construction, it automatically registers
/// the object with the [`global_registry`].
///
/// # Related Types
///
/// - [`Object`] - The trait this helps implement
/// - [`ObjectId`] - Obtained via [`id()`](Self::id)
/// - [`ObjectRegistry`] - Where objects are registered
pub struct ObjectBase {
    id: ObjectId,
}

impl ObjectBase {
    /// Create a new ObjectBase, registering the object in the global registry.
    ///
    /// # Panics
    ///
    /// Panics if the global registry is not initialized.
    pub fn new<T: Object + 'static>() -> Self {
        let registry = global_registry().expect("Object registry not initialized");
        let id = registry.register::<T>();
        Self { id }
    }

    /// Get the object's ID.
    pub fn id(&self) -> ObjectId {
        self.id
    }

    /// Get the object's name from the registry.
    pub fn name(&self) -> String {
        global_registry()
            .and_then(|r| r.object_name(self.id))
            .unwrap_or_default()
    }

    /// Set the object's name in the registry.
    pub fn set_name(&self, name: impl Into<String>) {
        if let Ok(registry) = global_registry() {
            let _ = registry.set_object_name(self.id, name.into());
        }
    }

    /// Get the parent object ID.
    pub fn parent(&self) -> Option<ObjectId> {
        global_registry()
            .and_then(|r| r.parent(self.id))
            .ok()
            .flatten()
    }

    /// Set the parent object.
    pub fn set_parent(&self, parent: Option<ObjectId>) -> ObjectResult<()> {
        global_registry()?.set_parent(self.id, parent)
    }

    /// Get child object IDs.
    pub fn children(&self) -> Vec<ObjectId> {
        global_registry()
            .and_then(|r| r.children(self.id))
            .unwrap_or_default()
    }

    /// Find a child by name.
    pub fn find_child_by_name(&self, name: &str) -> Option<ObjectId> {
        global_registry()
            .and_then(|r| r.find_child_by_name(self.id, name))
            .ok()
            .flatten()
    }
}

impl Drop for ObjectBase {
    fn drop(&mut self) {
        // Automatically unregister from the global registry when dropped.
        if let Ok(registry) = global_registry() {
            let _ = registry.destroy(self.id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct TestObject {
        base: ObjectBase,
        value: i32,
    }

    impl TestObject {
        fn new(value: i32) -> Self {
            Self {
                base: ObjectBase::new::<Self>(),
                value,
            }
        }
    }

    impl Object for TestObject {
        fn object_id(&self) -> ObjectId {
            self.base.id()
        }
    }

    struct ChildObject {
        base: ObjectBase,
    }

    impl ChildObject {
        fn new(name: &str) -> Self {
            let obj = Self {
                base: ObjectBase::new::<Self>(),
            };
            obj.base.set_name(name);
            obj
        }
    }

    impl Object for ChildObject {
        fn object_id(&self) -> ObjectId {
            self.base.id()
        }
    }

    fn setup() {
        init_global_registry();
    }

    #[test]
    fn test_object_creation() {
        setup();
        let obj = TestObject::new(42);
        assert_eq!(obj.value, 42);
        assert!(global_registry().unwrap().contains(obj.object_id()));
    }

    #[test]
    fn test_object_name() {
        setup();
        let obj = TestObject::new(1);
        obj.base.set_name("test_object");
        assert_eq!(obj.base.name(), "test_object");
    }

    #[test]
    fn test_parent_child() {
        setup();
        let parent = TestObject::new(1);
        let child = ChildObject::new("child1");

        child.base.set_parent(Some(parent.object_id())).unwrap();

        assert_eq!(child.base.parent(), Some(parent.object_id()));
        assert!(parent.base.children().contains(&child.object_id()));
    }

    #[test]
    fn test_find_child_by_name() {
        setup();
        let parent = TestObject::new(1);
        let child1 = ChildObject::new("alpha");
        let child2 = ChildObject::new("beta");

        child1.base.set_parent(Some(parent.object_id())).unwrap();
        child2.base.set_parent(Some(parent.object_id())).unwrap();

        let found = parent.base.find_child_by_name("beta");
        assert_eq!(found, Some(child2.object_id()));
    }

    #[test]
    fn test_cascade_destroy() {
        setup();
        let registry = global_registry().unwrap();

        // Create objects directly in registry to test cascade delete without ObjectBase Drop
        let parent_id = registry.register::<TestObject>();
        let child1_id = registry.register::<ChildObject>();
        let child2_id = registry.register::<ChildObject>();
        let grandchild_id = registry.register::<ChildObject>();

        registry.set_parent(child1_id, Some(parent_id)).unwrap();
        registry.set_parent(child2_id, Some(parent_id)).unwrap();
        registry.set_parent(grandchild_id, Some(child1_id)).unwrap();

        registry.destroy(parent_id).unwrap();

        assert!(!registry.contains(parent_id));
        assert!(!registry.contains(child1_id));
        assert!(!registry.contains(child2_id));
        assert!(!registry.contains(grandchild_id));
    }

    #[test]
    fn test_circular_parentage_rejected() {
        setup();
        let obj1 = TestObject::new(1);
        let obj2 = TestObject::new(2);

        obj2.base.set_parent(Some(obj1.object_id())).unwrap();

        // Trying to set obj1's parent to obj2 should fail (circular)
        let result = obj1.base.set_parent(Some(obj2.object_id()));
        assert!(matches!(result, Err(ObjectError::CircularParentage)));
    }

    #[test]
    fn test_reparenting() {
        setup();
        let parent1 = TestObject::new(1);
        let parent2 = TestObject::new(2);
        let child = ChildObject::new("mobile");

        child.base.set_parent(Some(parent1.object_id())).unwrap();
        assert!(parent1.base.children().contains(&child.object_id()));

        child.base.set_parent(Some(parent2.object_id())).unwrap();

        assert!(!parent1.base.children().contains(&child.object_id()));
        assert!(parent2.base.children().contains(&child.object_id()));
        assert_eq!(child.base.parent(), Some(parent2.object_id()));
    }

    #[test]
    fn test_object_id_raw_round_trip() {
        setup();
        let obj = TestObject::new(7);
        let raw = obj.object_id().as_raw();
        assert_eq!(ObjectId::from_raw(raw), obj.object_id());
    }

    #[test]
    fn test_dump_object_tree() {
        setup();
        let parent = TestObject::new(1);
        parent.base.set_name("root");
        let child = ChildObject::new("leaf");
        child.base.set_parent(Some(parent.object_id())).unwrap();

        let dump = global_registry()
            .unwrap()
            .with_read(|r| r.dump_object_tree(parent.object_id()))
            .unwrap();
        assert!(dump.contains("root"));
        assert!(dump.contains("leaf"));
    }
}
