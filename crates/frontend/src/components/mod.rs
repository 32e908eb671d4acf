pub mod click_inspector;
pub mod detail_popup;
pub mod entity_list;
pub mod map_view;
pub mod search_panel;
