//! Subcommand arguments and their conversion into core parameters
//!
//! Argument structs carry the clap derives; the core crate only sees its
//! own parameter types, produced by the `From` implementations below.
//!
//! ```text
//! User Input → CLI Args (clap) → Core Params → Aggregator / Bid engine
//! ```

use std::path::PathBuf;

use clap::{Args, Subcommand, ValueEnum};
use jiff::civil::Date;
use stitch_core::{
    models::{
        DesignStep, MaterialsStep, NotesStep, ProductStep, SampleSize, ScheduleStep, StepData,
        StepKey,
    },
    params::{BidForm, ListQuotes, SortKey},
};

// ============================================================================
// Draft
// ============================================================================

/// Save the product step
#[derive(Args)]
pub struct ProductArgs {
    #[arg(short, long, help = "Product name")]
    pub name: String,
    #[arg(short, long, help = "Season, e.g. '2025 SS'")]
    pub season: String,
    #[arg(short, long, help = "Target customer code, e.g. 'W20'")]
    pub target: String,
    #[arg(short, long, help = "Design concept")]
    pub concept: String,
}

impl From<ProductArgs> for StepData {
    fn from(val: ProductArgs) -> Self {
        StepData::Product(ProductStep {
            name: val.name,
            season: val.season,
            target_customer_code: val.target,
            concept: val.concept,
        })
    }
}

/// Save the design step
///
/// Only the number of design files is stored in the draft. The files
/// themselves are passed with `--file` when the draft is submitted.
#[derive(Args)]
pub struct DesignArgs {
    #[arg(short, long, help = "Number of design files that will be attached")]
    pub files: u32,
    #[arg(short, long, default_value = "", help = "Design points for the factory")]
    pub points: String,
}

impl From<DesignArgs> for StepData {
    fn from(val: DesignArgs) -> Self {
        StepData::Design(DesignStep {
            file_count: val.files,
            point_description: val.points,
        })
    }
}

/// Save the materials step
#[derive(Args)]
pub struct MaterialsArgs {
    #[arg(short, long, help = "Fabric code (see `draft suggestions`)")]
    pub fabric: String,
    #[arg(short, long, help = "Accessory code (see `draft suggestions`)")]
    pub accessory: String,
}

impl From<MaterialsArgs> for StepData {
    fn from(val: MaterialsArgs) -> Self {
        StepData::Materials(MaterialsStep {
            fabric_code: val.fabric,
            accessory_code: val.accessory,
        })
    }
}

/// Save the schedule step
#[derive(Args)]
pub struct ScheduleArgs {
    #[arg(short, long, help = "Sample size (XS, S, M, L, XL, XXL, FREE)")]
    pub size: Option<SampleSize>,
    #[arg(short, long, help = "Total quantity in pieces")]
    pub quantity: Option<u32>,
    #[arg(short, long, help = "Due date (YYYY-MM-DD)")]
    pub due_date: Option<Date>,
}

impl From<ScheduleArgs> for StepData {
    fn from(val: ScheduleArgs) -> Self {
        StepData::Schedule(ScheduleStep {
            sample_size: val.size,
            total_quantity: val.quantity,
            due_date: val.due_date,
        })
    }
}

/// Save the notes step
#[derive(Args)]
pub struct NotesArgs {
    #[arg(help = "Free text for the factory")]
    pub text: String,
}

impl From<NotesArgs> for StepData {
    fn from(val: NotesArgs) -> Self {
        StepData::Notes(NotesStep { text: val.text })
    }
}

#[derive(Args)]
pub struct ValidateArgs {
    #[arg(help = "Step to check (product, design, materials, schedule, notes, review)")]
    pub step: StepKey,
}

/// Design files attached to the order
#[derive(Args)]
pub struct FilesArgs {
    #[arg(
        long = "file",
        help = "Design file to attach; may be repeated, only the first is uploaded"
    )]
    pub files: Vec<PathBuf>,
}

#[derive(Subcommand)]
pub enum DraftCommands {
    /// Show the saved draft
    #[command(alias = "s")]
    Show,
    /// Clear the saved draft
    Reset,
    /// List suggested fabric and accessory codes
    Suggestions,
    /// Save step 1: product
    Product(ProductArgs),
    /// Save step 2: design
    Design(DesignArgs),
    /// Save step 3: materials
    Materials(MaterialsArgs),
    /// Save step 4: schedule
    Schedule(ScheduleArgs),
    /// Save step 5: notes
    Notes(NotesArgs),
    /// Check whether a step is complete
    #[command(alias = "v")]
    Validate(ValidateArgs),
    /// Preview the request the draft would submit
    Payload(FilesArgs),
    /// Submit the draft as a new order
    Submit(FilesArgs),
}

// ============================================================================
// Quotes
// ============================================================================

/// Quote list ordering
#[derive(Copy, Clone, PartialEq, Eq, Default, ValueEnum)]
pub enum SortArg {
    /// Most recently created first
    #[default]
    Default,
    /// Largest quantity first
    Quantity,
    /// Latest due date first
    DueDate,
}

impl From<SortArg> for SortKey {
    fn from(val: SortArg) -> Self {
        match val {
            SortArg::Default => SortKey::Default,
            SortArg::Quantity => SortKey::Quantity,
            SortArg::DueDate => SortKey::DueDate,
        }
    }
}

#[derive(Args)]
pub struct ListQuotesArgs {
    #[arg(short, long, value_enum, default_value_t = SortArg::Default)]
    pub sort: SortArg,
}

impl From<ListQuotesArgs> for ListQuotes {
    fn from(val: ListQuotesArgs) -> Self {
        ListQuotes {
            sort: val.sort.into(),
        }
    }
}

#[derive(Subcommand)]
pub enum QuoteCommands {
    /// List quote requests with this factory's bid status
    #[command(aliases = ["l", "ls"])]
    List(ListQuotesArgs),
}

// ============================================================================
// Bids
// ============================================================================

/// Bid form values shared by submit and edit
#[derive(Args)]
pub struct BidFormArgs {
    #[arg(short, long, help = "Unit work price in won")]
    pub price: f64,
    #[arg(short, long, help = "Promised delivery date (YYYY-MM-DD); 7 days if omitted")]
    pub delivery_date: Option<Date>,
    #[arg(short, long, help = "Notes for the designer")]
    pub notes: Option<String>,
}

impl From<BidFormArgs> for BidForm {
    fn from(val: BidFormArgs) -> Self {
        BidForm {
            work_price: Some(val.price),
            delivery_date: val.delivery_date,
            notes: val.notes.unwrap_or_default(),
        }
    }
}

#[derive(Args)]
pub struct SubmitBidArgs {
    #[arg(help = "Order id as shown in `quotes list`")]
    pub order_id: u64,
    #[command(flatten)]
    pub form: BidFormArgs,
}

#[derive(Args)]
pub struct EditBidArgs {
    #[arg(help = "Order id as shown in `quotes list`")]
    pub order_id: u64,
    #[arg(long, help = "Id of the bid to edit")]
    pub bid_id: u64,
    #[command(flatten)]
    pub form: BidFormArgs,
}

#[derive(Subcommand)]
pub enum BidCommands {
    /// Place a new bid on an order
    #[command(alias = "s")]
    Submit(SubmitBidArgs),
    /// Edit an existing bid
    #[command(alias = "e")]
    Edit(EditBidArgs),
}

// ============================================================================
// Worksheets
// ============================================================================

#[derive(Args)]
pub struct ExportWorksheetArgs {
    #[arg(short, long, help = "JSON file with the order data")]
    pub input: PathBuf,
    #[arg(short, long, help = "Where to write the xlsx file")]
    pub output: PathBuf,
}

#[derive(Subcommand)]
pub enum WorksheetCommands {
    /// Export order data to an xlsx worksheet
    #[command(alias = "x")]
    Export(ExportWorksheetArgs),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bid_form_conversion() {
        let form: BidForm = BidFormArgs {
            price: 15000.0,
            delivery_date: None,
            notes: None,
        }
        .into();
        assert_eq!(form.work_price, Some(15000.0));
        assert_eq!(form.notes, "");
    }

    #[test]
    fn test_product_args_map_target_to_customer_code() {
        let data: StepData = ProductArgs {
            name: "Boxy tee".to_string(),
            season: "2025 SS".to_string(),
            target: "W20".to_string(),
            concept: "Basics".to_string(),
        }
        .into();
        match data {
            StepData::Product(step) => assert_eq!(step.target_customer_code, "W20"),
            other => panic!("expected product step, got {other:?}"),
        }
    }
}
