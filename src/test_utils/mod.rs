#![allow(missing_docs)]

pub(crate) mod fixtures;
pub(crate) mod html;
pub(crate) mod http;

pub(crate) use fixtures::sample_dataset;
pub(crate) use html::{assert_element_exists, assert_valid_html, parse_html_document};
pub(crate) use http::{assert_status_ok, response_json, response_text};
