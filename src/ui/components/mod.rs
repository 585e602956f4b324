pub mod dialogs;
pub mod input_bar;
pub mod message_list;
pub mod review_window;
