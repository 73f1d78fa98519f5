use fintrack_domain::{Category, NewCategory};

use crate::{book::FinanceBook, BookSnapshot, CoreError, CoreResult};

pub struct CategoryService;

impl CategoryService {
    /// Trims the name and enforces case-insensitive uniqueness.
    pub fn add(
        book: &mut FinanceBook,
        mut draft: NewCategory,
    ) -> CoreResult<(Category, BookSnapshot)> {
        let name = draft.name.trim().to_string();
        if name.is_empty() {
            return Err(CoreError::Validation("Please enter a category name".into()));
        }
        if book.category_named(&name).is_some() {
            return Err(CoreError::Validation("This category already exists".into()));
        }
        draft.name = name;
        Ok(book.add_category(draft))
    }

    /// Deletes the category. Transactions carrying its name are left alone.
    pub fn remove(book: &mut FinanceBook, id: &str) -> CoreResult<Category> {
        book.remove_category(id)
            .ok_or_else(|| CoreError::CategoryNotFound(id.to_string()))
    }
}
