//! Query-string pagination for listing endpoints.

use std::future::{Ready, ready};

use actix_web::dev::Payload;
use actix_web::{FromRequest, HttpRequest, web};
use pagination::{DEFAULT_PAGE_ITEMS, FIRST_PAGE, MAX_PAGE_ITEMS, PageRequest};
use serde::Deserialize;
use tracing::debug;

use crate::domain::Error;
use crate::domain::validation::{Constraint, Subject, ValidationBuilder};

const WRONG_DATA: &str = "Wrong data";
const INTEGER_PATTERN: &str = "^-?[0-9]+$";

#[derive(Debug, Default, Deserialize)]
struct RawPageQuery {
    page: Option<String>,
    page_items: Option<String>,
}

/// `?page=&page_items=` extractor producing a validated [`PageRequest`].
///
/// Missing parameters fall back to the first page of
/// [`DEFAULT_PAGE_ITEMS`] items. Invalid values are rejected with an
/// `invalid_request` envelope whose errors are keyed `page` and
/// `page_items`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageQuery(pub PageRequest);

impl PageQuery {
    /// The validated request.
    pub fn into_inner(self) -> PageRequest {
        self.0
    }

    fn from_query(query: &str) -> Result<Self, Error> {
        let raw = web::Query::<RawPageQuery>::from_query(query)
            .map_err(|err| {
                debug!(error = %err, "malformed pagination query");
                Error::invalid_request(WRONG_DATA).with_error("query", err.to_string())
            })?
            .into_inner();
        let page = raw.page.as_deref();
        let page_items = raw.page_items.as_deref();

        let errors = ValidationBuilder::new();
        let errors = check_integer(errors, "page", page, u32::MAX);
        let errors = check_integer(errors, "page_items", page_items, MAX_PAGE_ITEMS).build();
        if !errors.is_empty() {
            return Err(Error::from_validation(WRONG_DATA, &errors));
        }

        let page = parse_or(page, FIRST_PAGE)?;
        let page_items = parse_or(page_items, DEFAULT_PAGE_ITEMS)?;
        PageRequest::new(page, page_items)
            .map(Self)
            .map_err(|err| Error::invalid_request(err.to_string()))
    }
}

/// Record violations for an optional integer parameter within `1..=max`.
fn check_integer(
    builder: ValidationBuilder,
    field: &str,
    raw: Option<&str>,
    max: u32,
) -> ValidationBuilder {
    let Some(text) = raw else {
        return builder;
    };
    let builder = builder.check(
        field,
        Subject::Text(text),
        &[Constraint::NotBlank, Constraint::Regex(INTEGER_PATTERN)],
    );
    let digits = text.strip_prefix('-').unwrap_or(text);
    if digits.is_empty() || !digits.bytes().all(|byte| byte.is_ascii_digit()) {
        return builder;
    }
    let Ok(number) = text.parse::<f64>() else {
        return builder;
    };
    builder.check(
        field,
        Subject::Number(number),
        &[
            Constraint::GreaterThanOrEqual(1.0),
            Constraint::LessThanOrEqual(f64::from(max)),
        ],
    )
}

fn parse_or(raw: Option<&str>, default: u32) -> Result<u32, Error> {
    raw.map_or(Ok(default), |text| {
        text.parse::<u32>()
            .map_err(|err| Error::invalid_request(err.to_string()))
    })
}

impl FromRequest for PageQuery {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(Self::from_query(req.query_string()))
    }
}
