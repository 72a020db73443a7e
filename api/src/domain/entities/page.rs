//! Pagination and sorting types shared by list and search operations.

use serde::Serialize;

/// One page of an ordered result set.
///
/// Pages are zero-indexed. `total_items` and `total_pages` are computed over
/// the set the page was drawn from (the filtered set for a search, the whole
/// store for an unfiltered listing).
#[derive(Debug, Clone, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub page_index: u64,
    pub page_size: u64,
    pub total_items: u64,
    pub total_pages: u64,
}

impl<T> Page<T> {
    /// Assemble a page. `page_size` must be non-zero; services validate it
    /// before any store call.
    pub fn new(items: Vec<T>, page_index: u64, page_size: u64, total_items: u64) -> Self {
        let total_pages = if total_items == 0 {
            0
        } else {
            total_items.div_ceil(page_size)
        };
        Self {
            items,
            page_index,
            page_size,
            total_items,
            total_pages,
        }
    }

    /// Convert the item type while keeping the page frame.
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            page_index: self.page_index,
            page_size: self.page_size,
            total_items: self.total_items,
            total_pages: self.total_pages,
        }
    }
}

/// Sort direction for listings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Ascending,
    Descending,
}

impl Default for SortDirection {
    fn default() -> Self {
        SortDirection::Ascending
    }
}

impl std::fmt::Display for SortDirection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SortDirection::Ascending => write!(f, "ascending"),
            SortDirection::Descending => write!(f, "descending"),
        }
    }
}

impl std::str::FromStr for SortDirection {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "asc" | "ascending" => Ok(SortDirection::Ascending),
            "desc" | "descending" => Ok(SortDirection::Descending),
            _ => Err(format!("Unknown sort direction: {}", s)),
        }
    }
}

/// Sortable product fields.
///
/// Listings take this typed enum rather than a raw column name, so an
/// unknown field fails at the parse boundary instead of being silently
/// ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ProductSortField {
    Id,
    Name,
    Sku,
    Price,
    Quantity,
    Category,
    Brand,
    CreatedAt,
    UpdatedAt,
}

impl Default for ProductSortField {
    fn default() -> Self {
        ProductSortField::Id
    }
}

impl std::fmt::Display for ProductSortField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ProductSortField::Id => "id",
            ProductSortField::Name => "name",
            ProductSortField::Sku => "sku",
            ProductSortField::Price => "price",
            ProductSortField::Quantity => "quantity",
            ProductSortField::Category => "category",
            ProductSortField::Brand => "brand",
            ProductSortField::CreatedAt => "created_at",
            ProductSortField::UpdatedAt => "updated_at",
        };
        write!(f, "{}", name)
    }
}

impl std::str::FromStr for ProductSortField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "id" => Ok(ProductSortField::Id),
            "name" => Ok(ProductSortField::Name),
            "sku" => Ok(ProductSortField::Sku),
            "price" => Ok(ProductSortField::Price),
            "quantity" => Ok(ProductSortField::Quantity),
            "category" => Ok(ProductSortField::Category),
            "brand" => Ok(ProductSortField::Brand),
            "created_at" => Ok(ProductSortField::CreatedAt),
            "updated_at" => Ok(ProductSortField::UpdatedAt),
            _ => Err(format!("Unknown sort field: {}", s)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_result_has_zero_pages() {
        let page: Page<i32> = Page::new(vec![], 0, 10, 0);
        assert_eq!(page.total_items, 0);
        assert_eq!(page.total_pages, 0);
    }

    #[test]
    fn total_pages_rounds_up() {
        let page: Page<i32> = Page::new(vec![1, 2, 3], 0, 3, 10);
        assert_eq!(page.total_pages, 4);

        let page: Page<i32> = Page::new(vec![1, 2, 3], 0, 5, 10);
        assert_eq!(page.total_pages, 2);
    }

    #[test]
    fn map_keeps_the_page_frame() {
        let page = Page::new(vec![1, 2], 1, 2, 5).map(|n| n.to_string());
        assert_eq!(page.items, vec!["1", "2"]);
        assert_eq!(page.page_index, 1);
        assert_eq!(page.page_size, 2);
        assert_eq!(page.total_items, 5);
        assert_eq!(page.total_pages, 3);
    }

    #[test]
    fn sort_direction_from_str() {
        assert_eq!(
            "asc".parse::<SortDirection>().unwrap(),
            SortDirection::Ascending
        );
        assert_eq!(
            "DESCENDING".parse::<SortDirection>().unwrap(),
            SortDirection::Descending
        );
        assert!("sideways".parse::<SortDirection>().is_err());
    }

    #[test]
    fn sort_field_from_str_rejects_unknown_fields() {
        assert_eq!(
            "price".parse::<ProductSortField>().unwrap(),
            ProductSortField::Price
        );
        assert_eq!(
            "created_at".parse::<ProductSortField>().unwrap(),
            ProductSortField::CreatedAt
        );
        assert!("password".parse::<ProductSortField>().is_err());
    }
}
