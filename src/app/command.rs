//! Console command parsing.
//!
//! Turns one line of operator input into a [`Command`]. Arguments are split on
//! whitespace; double quotes group words (`name="Safety Glasses"`). Field
//! assignments use `key=value`.
//!
//! | Command | Effect |
//! |---|---|
//! | `refresh` | re-fetch products |
//! | `search <text>` | set the search query (empty clears it) |
//! | `filter key=value…` | adjust filters: `brand`, `material`, `color`, `barcode`, `min`, `max`, `enrichment` |
//! | `reset` | clear all filters |
//! | `select <id>` / `select-all` | toggle selection |
//! | `show <id>` | product details |
//! | `options` | filter vocabularies |
//! | `add key=value…` | create a product (`id=auto` generates an id) |
//! | `edit <id> key=value…` | update a product |
//! | `delete <id>` / `delete-selected` | remove products |
//! | `enrich <id>` / `save-enrichment` / `discard-enrichment` | enrichment flow |
//! | `help` / `quit` | |

use super::filters::{EnrichmentFilter, FilterCriteria, Selector};
use super::handler::Event;
use super::state::CatalogState;
use crate::domain::{CatalogError, Result};
use crate::forms::ProductForm;

/// A parsed console line.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Feed this event to the runtime.
    Dispatch(Event),
    /// Print details of one product.
    Show(i64),
    /// Print the filter vocabularies.
    Options,
    Help,
    Quit,
    /// Blank line.
    Nothing,
}

/// Usage text for the `help` command.
pub const HELP: &str = "\
Commands:
  refresh                         reload products from the store
  search <text>                   search by id, name, barcode or brand
  filter key=value ...            brand, material, color, barcode, min, max, enrichment
  reset                           clear all filters
  select <id>                     toggle selection of a visible product
  select-all                      select or clear every visible product
  show <id>                       show product details
  options                         list filter values
  add key=value ...               add a product (id=auto generates an id)
  edit <id> key=value ...         update a product
  delete <id>                     delete a product
  delete-selected                 delete all selected products
  enrich <id>                     request AI enrichment
  save-enrichment                 save the pending enrichment
  discard-enrichment              discard the pending enrichment
  help                            show this text
  quit                            exit";

/// Parses one console line against the current state.
///
/// The state supplies the current filters (so `filter` adjusts rather than
/// replaces them) and the product being edited.
///
/// # Errors
///
/// Returns [`CatalogError::Validation`] for unknown commands, missing or
/// malformed arguments, and unknown field names. Returns
/// [`CatalogError::ProductNotFound`] when `edit` names an unknown product.
pub fn parse_command(line: &str, state: &CatalogState) -> Result<Command> {
    let tokens = tokenize(line)?;
    let Some((name, args)) = tokens.split_first() else {
        return Ok(Command::Nothing);
    };

    let command = match name.as_str() {
        "refresh" => Command::Dispatch(Event::Refresh),
        "search" => Command::Dispatch(Event::SearchChanged(args.join(" "))),
        "filter" => {
            let mut criteria = state.filters().clone();
            for (key, value) in assignments(args)? {
                apply_filter(&mut criteria, key, value)?;
            }
            Command::Dispatch(Event::FiltersApplied(criteria))
        }
        "reset" => Command::Dispatch(Event::FiltersReset),
        "select" => Command::Dispatch(Event::ToggleSelection(single_id(args)?)),
        "select-all" => Command::Dispatch(Event::ToggleSelectAll),
        "show" => Command::Show(single_id(args)?),
        "options" => Command::Options,
        "add" => {
            let mut form = ProductForm::for_create();
            for (key, value) in assignments(args)? {
                if key == "id" && value.eq_ignore_ascii_case("auto") {
                    form.generate_id();
                } else {
                    form.set(key, value)?;
                }
            }
            Command::Dispatch(Event::CreateProduct(form))
        }
        "edit" => {
            let (id, rest) = args
                .split_first()
                .ok_or_else(|| usage("edit <id> key=value ..."))?;
            let id = parse_id(id)?;
            let product = state.product(id).ok_or(CatalogError::ProductNotFound(id))?;
            let mut form = ProductForm::from_product(product);
            for (key, value) in assignments(rest)? {
                if key == "id" {
                    return Err(CatalogError::validation("id", "the id of a product cannot be changed"));
                }
                form.set(key, value)?;
            }
            Command::Dispatch(Event::EditProduct { id, form })
        }
        "delete" => Command::Dispatch(Event::DeleteProduct(single_id(args)?)),
        "delete-selected" => Command::Dispatch(Event::DeleteSelected),
        "enrich" => Command::Dispatch(Event::EnrichProduct(single_id(args)?)),
        "save-enrichment" => Command::Dispatch(Event::SaveEnrichment),
        "discard-enrichment" => Command::Dispatch(Event::DiscardEnrichment),
        "help" | "?" => Command::Help,
        "quit" | "exit" | "q" => Command::Quit,
        other => {
            return Err(CatalogError::validation(
                "command",
                format!("unknown command '{other}', type 'help' for a list"),
            ))
        }
    };

    Ok(command)
}

fn apply_filter(criteria: &mut FilterCriteria, key: &str, value: &str) -> Result<()> {
    match key {
        "brand" => criteria.brand = Selector::parse(value),
        "material" => criteria.material = Selector::parse(value),
        "color" => criteria.color = Selector::parse(value),
        "barcode" => criteria.barcode = value.trim().to_string(),
        "min" | "weight_min" => criteria.weight.min = value.trim().to_string(),
        "max" | "weight_max" => criteria.weight.max = value.trim().to_string(),
        "enrichment" => criteria.enrichment = EnrichmentFilter::parse(value),
        _ => {
            return Err(CatalogError::validation(
                "filter",
                format!("unknown filter '{key}'"),
            ))
        }
    }
    Ok(())
}

fn usage(text: &str) -> CatalogError {
    CatalogError::validation("command", format!("usage: {text}"))
}

fn parse_id(raw: &str) -> Result<i64> {
    raw.parse::<i64>()
        .map_err(|_| CatalogError::validation("id", format!("'{raw}' is not a product id")))
}

fn single_id(args: &[String]) -> Result<i64> {
    match args {
        [id] => parse_id(id),
        _ => Err(usage("<command> <id>")),
    }
}

fn assignments(args: &[String]) -> Result<Vec<(&str, &str)>> {
    args.iter()
        .map(|arg| {
            arg.split_once('=')
                .ok_or_else(|| CatalogError::validation("command", format!("expected key=value, got '{arg}'")))
        })
        .collect()
}

/// Splits a line into words, keeping double-quoted runs together.
///
/// Quotes may appear mid-word (`name="Safety Glasses"`) and are removed.
fn tokenize(line: &str) -> Result<Vec<String>> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut has_token = false;

    for c in line.chars() {
        match c {
            '"' => {
                in_quotes = !in_quotes;
                has_token = true;
            }
            c if c.is_whitespace() && !in_quotes => {
                if has_token {
                    tokens.push(std::mem::take(&mut current));
                    has_token = false;
                }
            }
            c => {
                current.push(c);
                has_token = true;
            }
        }
    }

    if in_quotes {
        return Err(CatalogError::validation("command", "unterminated quote"));
    }
    if has_token {
        tokens.push(current);
    }
    Ok(tokens)
}
