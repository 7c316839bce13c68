//! Announcements, shop listings and staff notes.

use crate::store::models::{
    Announcement, NewAnnouncement, NewNote, NewShopProduct, Note, ShopProduct, ShopProductPatch,
};
use crate::store::{new_id, Store};

impl Store {
    // -- Announcements --

    pub fn list_announcements(&self) -> Vec<Announcement> {
        self.announcements.newest_first()
    }

    pub fn create_announcement(&mut self, new: NewAnnouncement) -> Announcement {
        let announcement = Announcement {
            id: new_id(),
            title: new.title,
            user: new.user,
            description: new.description,
            created_at: self.now(),
        };
        self.announcements.insert(announcement)
    }

    pub fn delete_announcement(&mut self, id: &str) -> bool {
        self.announcements.remove(id)
    }

    // -- Shop --

    pub fn list_shop_products(&self) -> Vec<ShopProduct> {
        self.shop_products.newest_first()
    }

    pub fn get_shop_product(&self, id: &str) -> Option<ShopProduct> {
        self.shop_products.get(id).cloned()
    }

    pub fn create_shop_product(&mut self, new: NewShopProduct) -> ShopProduct {
        let product = ShopProduct {
            id: new_id(),
            name: new.name,
            link: new.link,
            price: new.price,
            category: new.category,
            created_at: self.now(),
        };
        self.shop_products.insert(product)
    }

    pub fn update_shop_product(&mut self, id: &str, patch: ShopProductPatch) -> Option<ShopProduct> {
        let product = self.shop_products.get_mut(id)?;

        if let Some(name) = patch.name {
            product.name = name;
        }
        if let Some(link) = patch.link {
            product.link = link;
        }
        if let Some(price) = patch.price {
            product.price = price;
        }
        if let Some(category) = patch.category {
            product.category = category;
        }

        Some(product.clone())
    }

    pub fn delete_shop_product(&mut self, id: &str) -> bool {
        self.shop_products.remove(id)
    }

    // -- Notes --

    pub fn list_notes(&self) -> Vec<Note> {
        self.notes.newest_first()
    }

    pub fn create_note(&mut self, new: NewNote) -> Note {
        let note = Note {
            id: new_id(),
            title: new.title,
            description: new.description,
            created_at: self.now(),
            created_by: new.created_by,
        };
        self.notes.insert(note)
    }

    pub fn delete_note(&mut self, id: &str) -> bool {
        self.notes.remove(id)
    }
}
