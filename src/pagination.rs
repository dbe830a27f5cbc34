//! This modules defines the common functionality for paging data.

/// The config for pagination
#[derive(Debug, Clone)]
pub struct PaginationConfig {
    /// The page number to default to when not specified in a request.
    pub default_page: u64,
    /// The maximum transactions to display per page when not specified in a request.
    pub default_page_size: u64,
    /// The maximum number of pages to show in the pagination indicator.
    pub max_pages: u64,
}

impl Default for PaginationConfig {
    fn default() -> Self {
        Self {
            default_page: 1,
            default_page_size: 10,
            max_pages: 5,
        }
    }
}

/// The page a client asked for, after parsing the raw query values.
///
/// `None` means the value was given but does not start with a non-negative
/// integer. Such requests produce an empty page rather than an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    /// The 1-based page number.
    pub page: Option<u64>,
    /// The number of items per page.
    pub per_page: Option<u64>,
}

impl PageRequest {
    /// Parse the raw `page` and `perPage` query values, falling back to the
    /// defaults in `config` for values that are missing.
    ///
    /// Only the leading integer of each value is read, so "1.5" is page 1 and
    /// "2abc" is page 2.
    pub fn from_query(
        page: Option<&str>,
        per_page: Option<&str>,
        config: &PaginationConfig,
    ) -> Self {
        let parse = |value: Option<&str>, default: u64| match value {
            None => Some(default),
            Some(text) => parse_leading_integer(text),
        };

        Self {
            page: parse(page, config.default_page),
            per_page: parse(per_page, config.default_page_size),
        }
    }
}

/// Read the integer at the start of `text`, ignoring anything after its
/// digits.
///
/// Leading whitespace and a sign are allowed. Text without leading digits and
/// negative numbers give `None`.
fn parse_leading_integer(text: &str) -> Option<u64> {
    let text = text.trim_start();
    let (is_negative, unsigned) = match text.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, text.strip_prefix('+').unwrap_or(text)),
    };

    let digits_end = unsigned
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(unsigned.len());
    let number = unsigned[..digits_end].parse::<u64>().ok()?;

    if is_negative && number != 0 {
        None
    } else {
        Some(number)
    }
}

/// One page of items and the size of the full collection.
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    /// The items on the requested page.
    pub items: Vec<T>,
    /// The number of items across all pages.
    pub total_count: usize,
    /// The number of pages, unknown when the page size is invalid or zero.
    pub total_pages: Option<u64>,
    /// The requested page number, unknown when it could not be parsed.
    pub current_page: Option<u64>,
}

/// Slice `items` into the page described by `request`.
///
/// Pages past the end, page zero and unparseable requests all give an empty
/// page.
pub fn paginate<T>(items: Vec<T>, request: PageRequest) -> Page<T> {
    let total_count = items.len();
    let total_pages = request
        .per_page
        .filter(|&per_page| per_page > 0)
        .map(|per_page| (total_count as u64).div_ceil(per_page));

    let items = match (request.page, request.per_page) {
        (Some(page), Some(per_page)) if page > 0 && per_page > 0 => {
            let start = (page - 1).saturating_mul(per_page);
            let start = usize::try_from(start).unwrap_or(usize::MAX);
            let per_page = usize::try_from(per_page).unwrap_or(usize::MAX);

            items.into_iter().skip(start).take(per_page).collect()
        }
        _ => Vec::new(),
    };

    Page {
        items,
        total_count,
        total_pages,
        current_page: request.page,
    }
}

#[derive(Debug, PartialEq, Eq)]
pub enum PaginationIndicator {
    Page(u64),
    CurrPage(u64),
    Ellipsis,
    NextButton(u64),
    BackButton(u64),
}

pub fn create_pagination_indicators(
    curr_page: u64,
    page_count: u64,
    max_pages: u64,
) -> Vec<PaginationIndicator> {
    let map_page = |page| {
        if page == curr_page {
            PaginationIndicator::CurrPage(page)
        } else {
            PaginationIndicator::Page(page)
        }
    };

    let mut indicators: Vec<PaginationIndicator> = if page_count <= max_pages {
        (1..=page_count).map(map_page).collect()
    } else if curr_page <= (max_pages / 2) {
        (1..=max_pages).map(map_page).collect()
    } else if curr_page > (page_count - max_pages / 2) {
        ((page_count - max_pages + 1)..=page_count)
            .map(map_page)
            .collect()
    } else {
        ((curr_page - max_pages / 2)..=(curr_page + max_pages / 2))
            .map(map_page)
            .collect()
    };

    if page_count > max_pages {
        if curr_page > (max_pages / 2) + 1 {
            indicators.insert(0, PaginationIndicator::Page(1));
            indicators.insert(1, PaginationIndicator::Ellipsis);
        }

        if curr_page < (page_count - max_pages / 2) {
            indicators.push(PaginationIndicator::Ellipsis);
            indicators.push(PaginationIndicator::Page(page_count));
        }
    }

    if curr_page > 1 {
        indicators.insert(0, PaginationIndicator::BackButton(curr_page - 1));
    }

    if curr_page < page_count {
        indicators.push(PaginationIndicator::NextButton(curr_page + 1));
    }

    indicators
}
