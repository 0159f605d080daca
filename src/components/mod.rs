pub mod booking_card;
pub mod properties_list;
pub mod property_detail;
pub mod review_form;
pub mod reviews_list;
