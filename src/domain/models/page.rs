use serde::{Deserialize, Serialize};
use super::validation::ValidationError;

pub const DEFAULT_PAGE_SIZE: u32 = 20;
pub const MAX_PAGE_SIZE: u32 = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    Id,
    Name,
    BeginEnrollmentDateTime,
    CloseEnrollmentDateTime,
    BeginEventDateTime,
    EndEventDateTime,
    BasePrice,
    MaxPrice,
    LimitOfEnrollment,
}

impl SortKey {
    pub fn from_property(property: &str) -> Option<Self> {
        let key = match property {
            "id" => SortKey::Id,
            "name" => SortKey::Name,
            "beginEnrollmentDateTime" => SortKey::BeginEnrollmentDateTime,
            "closeEnrollmentDateTime" => SortKey::CloseEnrollmentDateTime,
            "beginEventDateTime" => SortKey::BeginEventDateTime,
            "endEventDateTime" => SortKey::EndEventDateTime,
            "basePrice" => SortKey::BasePrice,
            "maxPrice" => SortKey::MaxPrice,
            "limitOfEnrollment" => SortKey::LimitOfEnrollment,
            _ => return None,
        };
        Some(key)
    }

    pub fn property(&self) -> &'static str {
        match self {
            SortKey::Id => "id",
            SortKey::Name => "name",
            SortKey::BeginEnrollmentDateTime => "beginEnrollmentDateTime",
            SortKey::CloseEnrollmentDateTime => "closeEnrollmentDateTime",
            SortKey::BeginEventDateTime => "beginEventDateTime",
            SortKey::EndEventDateTime => "endEventDateTime",
            SortKey::BasePrice => "basePrice",
            SortKey::MaxPrice => "maxPrice",
            SortKey::LimitOfEnrollment => "limitOfEnrollment",
        }
    }

    /// Column name in the `events` table. Only ever one of a fixed set, so it
    /// is safe to splice into an ORDER BY clause.
    pub fn column(&self) -> &'static str {
        match self {
            SortKey::Id => "id",
            SortKey::Name => "name",
            SortKey::BeginEnrollmentDateTime => "begin_enrollment_date_time",
            SortKey::CloseEnrollmentDateTime => "close_enrollment_date_time",
            SortKey::BeginEventDateTime => "begin_event_date_time",
            SortKey::EndEventDateTime => "end_event_date_time",
            SortKey::BasePrice => "base_price",
            SortKey::MaxPrice => "max_price",
            SortKey::LimitOfEnrollment => "limit_of_enrollment",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Direction {
    #[default]
    Asc,
    Desc,
}

impl Direction {
    pub fn as_sql(&self) -> &'static str {
        match self {
            Direction::Asc => "ASC",
            Direction::Desc => "DESC",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sort {
    pub key: SortKey,
    pub direction: Direction,
}

impl Sort {
    /// Parses `property` or `property,ASC|DESC`.
    pub fn parse(raw: &str) -> Result<Self, ValidationError> {
        let mut parts = raw.splitn(2, ',');
        let property = parts.next().unwrap_or_default().trim();
        let key = SortKey::from_property(property).ok_or_else(|| {
            ValidationError::field("sort", "unknownProperty", format!("cannot sort by '{}'", property))
        })?;

        let direction = match parts.next().map(|d| d.trim().to_ascii_uppercase()) {
            None => Direction::Asc,
            Some(d) if d.is_empty() || d == "ASC" => Direction::Asc,
            Some(d) if d == "DESC" => Direction::Desc,
            Some(d) => {
                return Err(ValidationError::field(
                    "sort",
                    "unknownDirection",
                    format!("sort direction must be ASC or DESC, got '{}'", d),
                ))
            }
        };

        Ok(Self { key, direction })
    }

    pub fn to_param(&self) -> String {
        format!("{},{}", self.key.property(), self.direction.as_sql())
    }

    /// ORDER BY clause body, with `id` as a tie breaker so pages are stable.
    pub fn order_by(sort: Option<&Sort>) -> String {
        match sort {
            None => "id ASC".to_string(),
            Some(s) if s.key == SortKey::Id => format!("id {}", s.direction.as_sql()),
            Some(s) => format!("{} {}, id ASC", s.key.column(), s.direction.as_sql()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: u32,
    pub size: u32,
    pub sort: Option<Sort>,
}

impl Default for PageRequest {
    fn default() -> Self {
        Self { page: 0, size: DEFAULT_PAGE_SIZE, sort: None }
    }
}

impl PageRequest {
    /// Builds a request from raw query values. Oversized pages are clamped to
    /// `MAX_PAGE_SIZE`; a size of zero is rejected.
    pub fn parse(page: Option<u32>, size: Option<u32>, sort: Option<&str>) -> Result<Self, ValidationError> {
        let size = match size {
            None => DEFAULT_PAGE_SIZE,
            Some(0) => return Err(ValidationError::field("size", "Min", "page size must be at least 1")),
            Some(s) => s.min(MAX_PAGE_SIZE),
        };

        let sort = match sort.map(str::trim) {
            None | Some("") => None,
            Some(raw) => Some(Sort::parse(raw)?),
        };

        Ok(Self { page: page.unwrap_or(0), size, sort })
    }

    pub fn offset(&self) -> i64 {
        i64::from(self.page) * i64::from(self.size)
    }

    pub fn limit(&self) -> i64 {
        i64::from(self.size)
    }

    pub fn with_page(&self, page: u32) -> Self {
        Self { page, ..*self }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub content: Vec<T>,
    pub number: u32,
    pub size: u32,
    pub total_elements: u64,
}

impl<T> Page<T> {
    pub fn total_pages(&self) -> u32 {
        if self.size == 0 {
            return 0;
        }
        self.total_elements.div_ceil(u64::from(self.size)) as u32
    }

    pub fn has_previous(&self) -> bool {
        self.number > 0
    }

    pub fn has_next(&self) -> bool {
        self.number.saturating_add(1) < self.total_pages()
    }

    pub fn metadata(&self) -> PageMetadata {
        PageMetadata {
            size: self.size,
            total_elements: self.total_elements,
            total_pages: self.total_pages(),
            number: self.number,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageMetadata {
    pub size: u32,
    pub total_elements: u64,
    pub total_pages: u32,
    pub number: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_spring_style_sort() {
        let sort = Sort::parse("name,DESC").unwrap();
        assert_eq!(sort.key, SortKey::Name);
        assert_eq!(sort.direction, Direction::Desc);

        let sort = Sort::parse("basePrice").unwrap();
        assert_eq!(sort.direction, Direction::Asc);

        let sort = Sort::parse("maxPrice,desc").unwrap();
        assert_eq!(sort.to_param(), "maxPrice,DESC");
    }

    #[test]
    fn rejects_unknown_sort_property_and_direction() {
        let err = Sort::parse("manager,DESC").unwrap_err();
        assert_eq!(err.field, "sort");
        assert_eq!(err.code, "unknownProperty");

        let err = Sort::parse("name,SIDEWAYS").unwrap_err();
        assert_eq!(err.code, "unknownDirection");
    }

    #[test]
    fn order_by_always_ends_with_id() {
        assert_eq!(Sort::order_by(None), "id ASC");
        let sort = Sort::parse("name,DESC").unwrap();
        assert_eq!(Sort::order_by(Some(&sort)), "name DESC, id ASC");
        let sort = Sort::parse("id,DESC").unwrap();
        assert_eq!(Sort::order_by(Some(&sort)), "id DESC");
    }

    #[test]
    fn page_request_defaults_and_clamps() {
        let req = PageRequest::parse(None, None, None).unwrap();
        assert_eq!(req, PageRequest::default());

        let req = PageRequest::parse(Some(3), Some(5000), Some("")).unwrap();
        assert_eq!(req.size, MAX_PAGE_SIZE);
        assert_eq!(req.offset(), 300);
        assert!(req.sort.is_none());

        assert!(PageRequest::parse(None, Some(0), None).is_err());
    }

    #[test]
    fn page_navigation_flags() {
        let page = Page { content: vec![(); 10], number: 1, size: 10, total_elements: 30 };
        assert_eq!(page.total_pages(), 3);
        assert!(page.has_previous());
        assert!(page.has_next());

        let last = Page { content: vec![(); 10], number: 2, size: 10, total_elements: 30 };
        assert!(!last.has_next());

        let empty: Page<()> = Page { content: vec![], number: 0, size: 10, total_elements: 0 };
        assert_eq!(empty.total_pages(), 0);
        assert!(!empty.has_next());
        assert!(!empty.has_previous());
    }

    #[test]
    fn last_representable_page_has_no_next() {
        let page: Page<()> = Page { content: vec![], number: u32::MAX, size: 10, total_elements: 30 };
        assert!(!page.has_next());
        assert!(page.has_previous());
    }
}
