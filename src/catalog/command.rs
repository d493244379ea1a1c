pub mod add_manual_book_cmd;
pub mod get_book_cmd;
pub mod list_books_cmd;
pub mod lookup_book_cmd;
