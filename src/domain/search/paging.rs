//! Paging request, sort order and page result

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::domain::DomainError;

/// Sort direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    #[default]
    Asc,
    Desc,
}

impl Direction {
    pub fn as_sql(&self) -> &'static str {
        match self {
            Self::Asc => "ASC",
            Self::Desc => "DESC",
        }
    }
}

impl FromStr for Direction {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "asc" => Ok(Self::Asc),
            "desc" => Ok(Self::Desc),
            other => Err(DomainError::validation(format!(
                "Invalid sort direction '{}', expected 'asc' or 'desc'",
                other
            ))),
        }
    }
}

/// Fields a member search can be ordered by
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SortField {
    Id,
    Username,
    Age,
    TeamName,
}

impl SortField {
    /// Whether the underlying column can hold NULL
    pub fn is_nullable(&self) -> bool {
        matches!(self, Self::Username | Self::TeamName)
    }

    /// Fully qualified column in the member/team join
    pub fn column(&self) -> &'static str {
        match self {
            Self::Id => "m.id",
            Self::Username => "m.username",
            Self::Age => "m.age",
            Self::TeamName => "t.name",
        }
    }
}

impl FromStr for SortField {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "id" => Ok(Self::Id),
            "username" => Ok(Self::Username),
            "age" => Ok(Self::Age),
            "teamName" | "team_name" => Ok(Self::TeamName),
            other => Err(DomainError::validation(format!(
                "Unknown sort field '{}'",
                other
            ))),
        }
    }
}

impl std::fmt::Display for SortField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Id => write!(f, "id"),
            Self::Username => write!(f, "username"),
            Self::Age => write!(f, "age"),
            Self::TeamName => write!(f, "teamName"),
        }
    }
}

/// One `(field, direction)` pair of a sort order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SortOrder {
    pub field: SortField,
    pub direction: Direction,
}

impl SortOrder {
    pub fn asc(field: SortField) -> Self {
        Self {
            field,
            direction: Direction::Asc,
        }
    }

    pub fn desc(field: SortField) -> Self {
        Self {
            field,
            direction: Direction::Desc,
        }
    }
}

/// Ordered list of sort keys
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Sort {
    orders: Vec<SortOrder>,
}

impl Sort {
    /// No caller-requested order
    pub fn unsorted() -> Self {
        Self::default()
    }

    pub fn by(orders: Vec<SortOrder>) -> Self {
        Self { orders }
    }

    /// Parse `field[:dir],field[:dir]...`, e.g. `age:desc,username`
    pub fn parse(raw: &str) -> Result<Self, DomainError> {
        let mut orders = Vec::new();

        for entry in raw.split(',').map(str::trim).filter(|e| !e.is_empty()) {
            let order = match entry.split_once(':') {
                Some((field, direction)) => SortOrder {
                    field: field.parse()?,
                    direction: direction.parse()?,
                },
                None => SortOrder::asc(entry.parse()?),
            };
            orders.push(order);
        }

        Ok(Self { orders })
    }

    pub fn orders(&self) -> &[SortOrder] {
        &self.orders
    }

    pub fn is_unsorted(&self) -> bool {
        self.orders.is_empty()
    }
}

/// Offset/limit window plus sort requested by the caller
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRequest {
    offset: u64,
    limit: u64,
    sort: Sort,
}

impl PageRequest {
    /// Validates the window: offset must be non-negative, limit positive
    pub fn new(offset: i64, limit: i64) -> Result<Self, DomainError> {
        if offset < 0 {
            return Err(DomainError::validation(format!(
                "offset must not be negative (got {})",
                offset
            )));
        }

        if limit <= 0 {
            return Err(DomainError::validation(format!(
                "limit must be greater than zero (got {})",
                limit
            )));
        }

        Ok(Self {
            offset: offset as u64,
            limit: limit as u64,
            sort: Sort::unsorted(),
        })
    }

    pub fn with_sort(mut self, sort: Sort) -> Self {
        self.sort = sort;
        self
    }

    pub fn offset(&self) -> u64 {
        self.offset
    }

    pub fn limit(&self) -> u64 {
        self.limit
    }

    pub fn sort(&self) -> &Sort {
        &self.sort
    }
}

/// One window of results plus the exact total of the filtered set
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    content: Vec<T>,
    total_elements: u64,
    offset: u64,
    limit: u64,
}

impl<T> Page<T> {
    pub fn new(content: Vec<T>, request: &PageRequest, total_elements: u64) -> Self {
        debug_assert!(content.len() as u64 <= request.limit());

        Self {
            content,
            total_elements,
            offset: request.offset(),
            limit: request.limit(),
        }
    }

    pub fn content(&self) -> &[T] {
        &self.content
    }

    pub fn into_content(self) -> Vec<T> {
        self.content
    }

    pub fn total_elements(&self) -> u64 {
        self.total_elements
    }

    pub fn offset(&self) -> u64 {
        self.offset
    }

    pub fn limit(&self) -> u64 {
        self.limit
    }

    pub fn len(&self) -> usize {
        self.content.len()
    }

    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    pub fn total_pages(&self) -> u64 {
        self.total_elements.div_ceil(self.limit)
    }

    /// Zero-based page number containing `offset`
    pub fn number(&self) -> u64 {
        self.offset / self.limit
    }

    pub fn has_next(&self) -> bool {
        self.offset + (self.content.len() as u64) < self.total_elements
    }

    pub fn is_first(&self) -> bool {
        self.offset == 0
    }

    pub fn is_last(&self) -> bool {
        !self.has_next()
    }

    /// Convert the content while keeping the paging metadata
    pub fn map<U, F>(self, f: F) -> Page<U>
    where
        F: FnMut(T) -> U,
    {
        Page {
            content: self.content.into_iter().map(f).collect(),
            total_elements: self.total_elements,
            offset: self.offset,
            limit: self.limit,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_request_valid() {
        let request = PageRequest::new(10, 5).unwrap();
        assert_eq!(request.offset(), 10);
        assert_eq!(request.limit(), 5);
        assert!(request.sort().is_unsorted());
    }

    #[test]
    fn test_page_request_rejects_negative_offset() {
        let err = PageRequest::new(-1, 5).unwrap_err();
        assert!(matches!(err, DomainError::Validation { .. }));
    }

    #[test]
    fn test_page_request_rejects_non_positive_limit() {
        assert!(PageRequest::new(0, 0).is_err());
        assert!(PageRequest::new(0, -3).is_err());
    }

    #[test]
    fn test_sort_parse() {
        let sort = Sort::parse("age:desc, username ,teamName:ASC").unwrap();
        assert_eq!(
            sort.orders(),
            &[
                SortOrder::desc(SortField::Age),
                SortOrder::asc(SortField::Username),
                SortOrder::asc(SortField::TeamName),
            ]
        );
    }

    #[test]
    fn test_sort_parse_empty() {
        assert!(Sort::parse("").unwrap().is_unsorted());
        assert!(Sort::parse(" , ").unwrap().is_unsorted());
    }

    #[test]
    fn test_sort_parse_errors() {
        assert!(Sort::parse("password").is_err());
        assert!(Sort::parse("age:sideways").is_err());
    }

    #[test]
    fn test_sort_field_nullability() {
        assert!(SortField::Username.is_nullable());
        assert!(SortField::TeamName.is_nullable());
        assert!(!SortField::Age.is_nullable());
        assert!(!SortField::Id.is_nullable());
    }

    #[test]
    fn test_page_metadata() {
        let request = PageRequest::new(0, 3).unwrap();
        let page = Page::new(vec![1, 2, 3], &request, 4);

        assert_eq!(page.total_pages(), 2);
        assert_eq!(page.number(), 0);
        assert!(page.is_first());
        assert!(page.has_next());
        assert!(!page.is_last());

        let last = Page::new(vec![4], &PageRequest::new(3, 3).unwrap(), 4);
        assert_eq!(last.number(), 1);
        assert!(!last.has_next());
        assert!(last.is_last());
    }

    #[test]
    fn test_empty_page() {
        let request = PageRequest::new(0, 10).unwrap();
        let page: Page<i32> = Page::new(vec![], &request, 0);

        assert!(page.is_empty());
        assert_eq!(page.total_pages(), 0);
        assert!(page.is_last());
    }

    #[test]
    fn test_page_map() {
        let request = PageRequest::new(5, 5).unwrap();
        let page = Page::new(vec![1, 2], &request, 7).map(|n| n * 10);

        assert_eq!(page.content(), &[10, 20]);
        assert_eq!(page.total_elements(), 7);
        assert_eq!(page.offset(), 5);
        assert_eq!(page.limit(), 5);
    }
}
