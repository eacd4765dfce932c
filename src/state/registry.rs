use std::collections::BTreeMap;

use super::palette::ColorCycle;
use crate::error::HostError;
use crate::model::{Contact, ContactId};
use crate::util::{clog, cwarn};

/// Drawing side of the chooser. The core only stores and returns `Handle`s.
pub trait MarkerRenderer {
    type Handle;

    fn create_marker(&mut self, x: f64, y: f64, color: &str) -> Result<Self::Handle, HostError>;
    fn destroy_marker(&mut self, handle: Self::Handle);
    /// Paint (`Some`) or clear (`None`) the background under a marker.
    fn set_marker_background(&mut self, handle: &Self::Handle, color: Option<&str>);
    fn set_focus_overlay(&mut self, visible: bool, x: f64, y: f64, color: &str);
    /// Release anything the renderer created for itself (the focus overlay).
    fn dispose(&mut self) {}
}

/// Live contacts keyed by touch identifier. Sole owner of markers.
pub struct ContactRegistry<R: MarkerRenderer> {
    contacts: BTreeMap<ContactId, Contact<R::Handle>>,
    colors: ColorCycle,
    renderer: R,
}

impl<R: MarkerRenderer> ContactRegistry<R> {
    pub fn new(renderer: R, colors: ColorCycle) -> Self {
        Self {
            contacts: BTreeMap::new(),
            colors,
            renderer,
        }
    }

    /// Registers a new contact and draws its marker. A live id keeps its first registration.
    pub fn add_contact(&mut self, id: ContactId, x: f64, y: f64) -> bool {
        if self.has(id) {
            return false;
        }
        let color = self.colors.next_color();
        let marker = match self.renderer.create_marker(x, y, &color) {
            Ok(m) => m,
            Err(e) => {
                cwarn(&format!("contact {}: {}", id, e));
                return false;
            }
        };
        clog(&format!("contact {} down at ({:.0}, {:.0}) {}", id, x, y, color));
        self.contacts.insert(
            id,
            Contact {
                id,
                x,
                y,
                color,
                marker,
            },
        );
        true
    }

    /// Drops a contact and its marker. Absent ids are ignored.
    pub fn remove_contact(&mut self, id: ContactId) -> bool {
        match self.contacts.remove(&id) {
            Some(contact) => {
                self.renderer.destroy_marker(contact.marker);
                clog(&format!("contact {} removed", contact.id));
                true
            }
            None => false,
        }
    }

    pub fn has(&self, id: ContactId) -> bool {
        self.contacts.contains_key(&id)
    }

    pub fn get(&self, id: ContactId) -> Option<&Contact<R::Handle>> {
        self.contacts.get(&id)
    }

    /// Ids in ascending order.
    pub fn all_ids(&self) -> Vec<ContactId> {
        self.contacts.keys().copied().collect()
    }

    pub fn len(&self) -> usize {
        self.contacts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.contacts.is_empty()
    }

    pub fn set_focus(&mut self, id: ContactId, background: Option<&str>) {
        if let Some(contact) = self.contacts.get(&id) {
            self.renderer.set_marker_background(&contact.marker, background);
        }
    }

    pub fn clear(&mut self) {
        for (_, contact) in std::mem::take(&mut self.contacts) {
            self.renderer.destroy_marker(contact.marker);
        }
    }

    pub fn renderer_mut(&mut self) -> &mut R {
        &mut self.renderer
    }
}
