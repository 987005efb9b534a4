pub mod cauldron_view;
pub mod checkout_button;
pub mod deseos_list;
pub mod product_form;
pub mod products_list;
pub mod review_form;
pub mod reviews_list;
