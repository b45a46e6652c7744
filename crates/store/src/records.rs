//! 四类实体的 `Record` 实现

use crate::collection::Record;
use affbox_core::models::{
    ContentItem, ContentItemPatch, LeadMagnet, LeadMagnetPatch, NewContentItem, NewLeadMagnet,
    NewProduct, NewScheduleItem, Product, ProductPatch, ScheduleItem, ScheduleItemPatch,
};
use chrono::NaiveDate;

impl Record for Product {
    const ENTITY: &'static str = "Product";
    const TITLE: &'static str = "Product";
    const NOUN: &'static str = "product";

    type New = NewProduct;
    type Patch = ProductPatch;

    fn id(&self) -> u32 {
        self.id
    }

    fn label(&self) -> &str {
        &self.name
    }

    fn build(input: NewProduct, id: u32, today: NaiveDate) -> Self {
        Product::create(input, id, today)
    }

    fn merge(&mut self, patch: ProductPatch) {
        self.apply(patch);
    }
}

impl Record for ContentItem {
    const ENTITY: &'static str = "Content";
    const TITLE: &'static str = "Content";
    const NOUN: &'static str = "content";

    type New = NewContentItem;
    type Patch = ContentItemPatch;

    fn id(&self) -> u32 {
        self.id
    }

    fn label(&self) -> &str {
        &self.title
    }

    fn build(input: NewContentItem, id: u32, today: NaiveDate) -> Self {
        ContentItem::create(input, id, today)
    }

    fn merge(&mut self, patch: ContentItemPatch) {
        self.apply(patch);
    }
}

impl Record for ScheduleItem {
    const ENTITY: &'static str = "Schedule";
    const TITLE: &'static str = "Schedule";
    const NOUN: &'static str = "schedule";

    type New = NewScheduleItem;
    type Patch = ScheduleItemPatch;

    fn id(&self) -> u32 {
        self.id
    }

    fn label(&self) -> &str {
        &self.title
    }

    fn build(input: NewScheduleItem, id: u32, _today: NaiveDate) -> Self {
        ScheduleItem::create(input, id)
    }

    fn merge(&mut self, patch: ScheduleItemPatch) {
        self.apply(patch);
    }

    fn added_message(label: &str) -> String {
        format!("{label} has been scheduled successfully.")
    }

    fn deleted_message(label: &str) -> String {
        format!("{label} has been removed from the schedule.")
    }
}

impl Record for LeadMagnet {
    const ENTITY: &'static str = "Lead magnet";
    const TITLE: &'static str = "Lead Magnet";
    const NOUN: &'static str = "lead magnet";

    type New = NewLeadMagnet;
    type Patch = LeadMagnetPatch;

    fn id(&self) -> u32 {
        self.id
    }

    fn label(&self) -> &str {
        &self.title
    }

    fn build(input: NewLeadMagnet, id: u32, today: NaiveDate) -> Self {
        LeadMagnet::create(input, id, today)
    }

    fn merge(&mut self, patch: LeadMagnetPatch) {
        self.apply(patch);
    }
}
