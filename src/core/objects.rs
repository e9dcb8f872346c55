//=========================================================================
// Render Objects
//=========================================================================
//
// Arena of host render objects addressed by generation-counted handles.
//
// A handle stays valid until its object is despawned; the slot may then be
// reused, but the bumped generation makes every old handle resolve to
// `None` instead of silently aliasing the newcomer.
//
//=========================================================================

//=== External Dependencies ===============================================

use glam::Vec2;

//=== RenderObject ========================================================

/// Position and size of something the host draws.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderObject {
    /// Top-left corner in world units.
    pub position: Vec2,

    /// Extent in world units.
    pub size: Vec2,
}

impl RenderObject {
    pub fn new(position: Vec2, size: Vec2) -> Self {
        Self { position, size }
    }

    /// Centre point in world units.
    pub fn center(&self) -> Vec2 {
        self.position + self.size * 0.5
    }
}

//=== ObjectHandle ========================================================

/// Non-owning reference to an object in an [`ObjectArena`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObjectHandle {
    index: u32,
    generation: u32,
}

//=== ObjectArena =========================================================

#[derive(Debug)]
struct Slot {
    generation: u32,
    object: Option<RenderObject>,
}

/// Owns render objects; hands out [`ObjectHandle`]s.
#[derive(Debug, Default)]
pub struct ObjectArena {
    slots: Vec<Slot>,
    free: Vec<u32>,
    live: usize,
}

impl ObjectArena {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores an object and returns its handle.
    pub fn spawn(&mut self, object: RenderObject) -> ObjectHandle {
        self.live += 1;

        if let Some(index) = self.free.pop() {
            let slot = &mut self.slots[index as usize];
            slot.object = Some(object);
            return ObjectHandle { index, generation: slot.generation };
        }

        let index = self.slots.len() as u32;
        self.slots.push(Slot { generation: 0, object: Some(object) });
        ObjectHandle { index, generation: 0 }
    }

    /// Removes an object. Returns `None` if the handle was already stale.
    pub fn despawn(&mut self, handle: ObjectHandle) -> Option<RenderObject> {
        let slot = self.slot_mut(handle)?;
        let object = slot.object.take();
        slot.generation = slot.generation.wrapping_add(1);

        self.free.push(handle.index);
        self.live -= 1;
        object
    }

    pub fn get(&self, handle: ObjectHandle) -> Option<&RenderObject> {
        self.slots
            .get(handle.index as usize)
            .filter(|slot| slot.generation == handle.generation)
            .and_then(|slot| slot.object.as_ref())
    }

    pub fn get_mut(&mut self, handle: ObjectHandle) -> Option<&mut RenderObject> {
        self.slot_mut(handle).and_then(|slot| slot.object.as_mut())
    }

    /// `true` while the handle refers to a live object.
    pub fn contains(&self, handle: ObjectHandle) -> bool {
        self.get(handle).is_some()
    }

    pub fn len(&self) -> usize {
        self.live
    }

    pub fn is_empty(&self) -> bool {
        self.live == 0
    }

    /// Iterates over live objects with their handles.
    pub fn iter(&self) -> impl Iterator<Item = (ObjectHandle, &RenderObject)> {
        self.slots.iter().enumerate().filter_map(|(index, slot)| {
            slot.object.as_ref().map(|object| {
                (ObjectHandle { index: index as u32, generation: slot.generation }, object)
            })
        })
    }

    fn slot_mut(&mut self, handle: ObjectHandle) -> Option<&mut Slot> {
        self.slots
            .get_mut(handle.index as usize)
            .filter(|slot| slot.generation == handle.generation && slot.object.is_some())
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
