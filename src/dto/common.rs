use serde::{Deserialize, Serialize};

// Parámetros de paginación (?page=0&per_page=20)
#[derive(Debug, Clone, Deserialize)]
pub struct PageParams {
    pub page: Option<i64>,
    pub per_page: Option<i64>,
}

impl PageParams {
    pub fn page(&self) -> i64 {
        self.page.unwrap_or(0).max(0)
    }

    pub fn per_page(&self) -> i64 {
        self.per_page.unwrap_or(20).clamp(1, 100)
    }

    pub fn offset(&self) -> i64 {
        self.page() * self.per_page()
    }
}

// Response para listados paginados
#[derive(Debug, Serialize)]
pub struct PageResponse<T> {
    pub items: Vec<T>,
    pub total: i64,
    pub page: i64,
    pub per_page: i64,
    pub total_pages: i64,
}

impl<T> PageResponse<T> {
    pub fn new(items: Vec<T>, total: i64, params: &PageParams) -> Self {
        let per_page = params.per_page();
        let total_pages = if total == 0 {
            0
        } else {
            (total + per_page - 1) / per_page
        };

        Self {
            items,
            total,
            page: params.page(),
            per_page,
            total_pages,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_params_clamp_out_of_range_values() {
        let params = PageParams {
            page: Some(-3),
            per_page: Some(10_000),
        };

        assert_eq!(params.page(), 0);
        assert_eq!(params.per_page(), 100);
        assert_eq!(params.offset(), 0);
    }

    #[test]
    fn page_params_default_to_first_page_of_twenty() {
        let params = PageParams {
            page: None,
            per_page: None,
        };

        assert_eq!(params.page(), 0);
        assert_eq!(params.per_page(), 20);
    }

    #[test]
    fn page_response_rounds_total_pages_up() {
        let params = PageParams {
            page: Some(0),
            per_page: Some(20),
        };
        let page: PageResponse<i32> = PageResponse::new(vec![], 41, &params);

        assert_eq!(page.total_pages, 3);
    }

    #[test]
    fn empty_listing_has_zero_pages() {
        let params = PageParams {
            page: Some(0),
            per_page: Some(20),
        };
        let page: PageResponse<i32> = PageResponse::new(vec![], 0, &params);

        assert_eq!(page.total_pages, 0);
    }
}
