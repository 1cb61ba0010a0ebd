pub mod item_form;
pub mod itinerary_list;
pub mod progress_bar;
pub mod suggestion_list;
pub mod summary_panel;
