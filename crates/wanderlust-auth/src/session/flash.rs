//! Flash relay: one-time notices carried in the session until read.

use wanderlust_entity::flash::FlashCategory;

use super::model::Session;

impl Session {
    /// Queue a message for the next rendered view of this session.
    pub fn push_flash(&mut self, category: FlashCategory, text: impl Into<String>) {
        self.data.flash.push(category, text);
        self.modified = true;
    }

    /// Take every pending message of a category, oldest first.
    ///
    /// A second drain in the same request returns nothing.
    pub fn drain_flash(&mut self, category: FlashCategory) -> Vec<String> {
        let drained = self.data.flash.drain(category);
        if !drained.is_empty() {
            self.modified = true;
        }
        drained
    }
}
