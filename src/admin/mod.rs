pub mod forms;
pub mod handlers;

pub use handlers::{
    create_post_handler, dashboard_handler, delete_post_handler, edit_post_form, login_page,
    login_submit, logout_handler, new_post_form, update_post_handler,
};
