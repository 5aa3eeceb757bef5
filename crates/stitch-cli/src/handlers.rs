//! Command handlers: run one subcommand and render its outcome.

use std::{path::Path, time::Duration};

use anyhow::{Context, Result};
use log::debug;
use stitch_core::{
    bids::format_won,
    display::{CreateResult, FieldProblems, OperationStatus, QuoteOrders, UpdateResult},
    draft::{DraftAggregator, Navigation},
    models::{BidReceipt, DesignFile, StepData, SUGGESTED_ACCESSORIES, SUGGESTED_FABRICS},
    params::{BidForm, ListQuotes},
    worksheet::{build_worksheet, export_worksheet, map_worksheet, WorksheetData, WorksheetTemplate},
    ApiConfig, BidEngine, HttpMarketplaceApi,
};

use crate::{
    cli::{BidCommands, DraftCommands, FilesArgs, QuoteCommands, WorksheetCommands},
    renderer::TerminalRenderer,
};

/// Connection settings collected from global flags.
pub struct ApiSettings {
    pub base_url: Option<String>,
    pub token: Option<String>,
    pub timeout: Duration,
}

pub struct Cli {
    aggregator: DraftAggregator,
    api: ApiSettings,
    renderer: TerminalRenderer,
}

impl Cli {
    pub fn new(aggregator: DraftAggregator, api: ApiSettings, renderer: TerminalRenderer) -> Self {
        Self {
            aggregator,
            api,
            renderer,
        }
    }

    fn client(&self) -> Result<HttpMarketplaceApi> {
        let base_url = self
            .api
            .base_url
            .clone()
            .context("This command needs the marketplace API: pass --api-url or set STITCH_API_URL")?;
        let config = ApiConfig::new(base_url)?
            .with_token(self.api.token.clone())
            .with_timeout(self.api.timeout);
        Ok(HttpMarketplaceApi::new(config)?)
    }

    pub async fn handle_draft_command(&self, command: DraftCommands) -> Result<()> {
        match command {
            DraftCommands::Show => self.show_draft(),
            DraftCommands::Reset => {
                self.aggregator.reset().context("Failed to clear draft")?;
                self.renderer
                    .render(&OperationStatus::success("Draft cleared").to_string())
            }
            DraftCommands::Suggestions => self.show_suggestions(),
            DraftCommands::Product(args) => self.save_step(args.into()),
            DraftCommands::Design(args) => self.save_step(args.into()),
            DraftCommands::Materials(args) => self.save_step(args.into()),
            DraftCommands::Schedule(args) => self.save_step(args.into()),
            DraftCommands::Notes(args) => self.save_step(args.into()),
            DraftCommands::Validate(args) => {
                let draft = self.aggregator.load_draft();
                let problems = self.aggregator.step_problems(args.step, &draft);
                self.renderer.render(&FieldProblems(problems).to_string())
            }
            DraftCommands::Payload(args) => {
                let files = read_design_files(&args)?;
                let draft = self.aggregator.load_draft();
                let payload = self.aggregator.build_submission_payload(&draft, &files)?;
                self.renderer.render(&payload.to_string())
            }
            DraftCommands::Submit(args) => {
                let files = read_design_files(&args)?;
                let api = self.client()?;
                let submission = self
                    .aggregator
                    .submit_draft(&api, &files)
                    .await
                    .context("Failed to submit draft")?;
                self.renderer
                    .render(&CreateResult::new(submission).to_string())
            }
        }
    }

    pub fn show_draft(&self) -> Result<()> {
        let draft = self.aggregator.load_draft();
        self.renderer.render(&draft.to_string())
    }

    fn show_suggestions(&self) -> Result<()> {
        let mut output = String::from("## Fabrics\n\n");
        for code in SUGGESTED_FABRICS {
            output.push_str(&format!("- {code}\n"));
        }
        output.push_str("\n## Accessories\n\n");
        for code in SUGGESTED_ACCESSORIES {
            output.push_str(&format!("- {code}\n"));
        }
        self.renderer.render(&output)
    }

    fn save_step(&self, data: StepData) -> Result<()> {
        let step = data.key();
        self.aggregator
            .save_step(data)
            .with_context(|| format!("Failed to save {step} step"))?;

        let mut output = OperationStatus::success(format!("Saved {step} step")).to_string();
        match self.aggregator.advance(step) {
            Navigation::Next(next) => {
                output.push_str(&format!("\nNext: {next} (step {} of 6)\n", next.number()));
            }
            Navigation::Complete => output.push_str("\nThe draft is ready to submit.\n"),
            Navigation::Invalid { problems, .. } => {
                output.push('\n');
                output.push_str(&FieldProblems(problems).to_string());
            }
        }
        self.renderer.render(&output)
    }

    pub async fn handle_quote_command(&self, command: QuoteCommands) -> Result<()> {
        match command {
            QuoteCommands::List(args) => {
                let engine = BidEngine::new(self.client()?);
                let quotes = engine
                    .list_quotes(&ListQuotes::from(args))
                    .await
                    .context("Failed to load quote requests")?;
                self.renderer.render(&QuoteOrders(quotes).to_string())
            }
        }
    }

    pub async fn handle_bid_command(&self, command: BidCommands) -> Result<()> {
        let engine = BidEngine::new(self.client()?);
        match command {
            BidCommands::Submit(args) => {
                let order = engine.find_quote(args.order_id).await?;
                let form = BidForm::from(args.form);
                let receipt = engine
                    .submit_bid(&order, &form)
                    .await
                    .context("Failed to submit bid")?;
                self.renderer.render(&CreateResult::new(receipt).to_string())
            }
            BidCommands::Edit(args) => {
                let order = engine.find_quote(args.order_id).await?;
                let form = BidForm::from(args.form);
                let receipt = engine
                    .edit_bid(&order, args.bid_id, &form)
                    .await
                    .context("Failed to edit bid")?;
                let changes = bid_changes(&form, &receipt);
                self.renderer
                    .render(&UpdateResult::with_changes(receipt, changes).to_string())
            }
        }
    }

    pub async fn handle_worksheet_command(&self, command: WorksheetCommands) -> Result<()> {
        match command {
            WorksheetCommands::Export(args) => {
                let input = std::fs::read_to_string(&args.input)
                    .with_context(|| format!("Failed to read {}", args.input.display()))?;
                let data: WorksheetData = serde_json::from_str(&input)
                    .with_context(|| format!("Invalid worksheet data in {}", args.input.display()))?;
                let template = WorksheetTemplate::standard();

                let mut output = String::new();
                for warning in &map_worksheet(&data, &template).warnings {
                    output.push_str(&OperationStatus::from(warning).to_string());
                }

                let bytes = if self.api.base_url.is_some() {
                    export_worksheet(&self.client()?, &data, &template).await?
                } else {
                    debug!("No API configured; design image is not embedded");
                    build_worksheet(&data, &template, None)?
                };
                write_output(&args.output, &bytes)?;

                output.push_str(
                    &OperationStatus::success(format!(
                        "Worksheet written to {}",
                        args.output.display()
                    ))
                    .to_string(),
                );
                self.renderer.render(&output)
            }
        }
    }
}

fn read_design_files(args: &FilesArgs) -> Result<Vec<DesignFile>> {
    args.files
        .iter()
        .map(|path| {
            DesignFile::read(path)
                .with_context(|| format!("Failed to read design file {}", path.display()))
        })
        .collect()
}

fn write_output(path: &Path, bytes: &[u8]) -> Result<()> {
    std::fs::write(path, bytes).with_context(|| format!("Failed to write {}", path.display()))
}

fn bid_changes(form: &BidForm, receipt: &BidReceipt) -> Vec<String> {
    let mut changes = Vec::new();
    if let Some(price) = form.work_price {
        changes.push(format!("Unit price: {} won", format_won(price)));
    }
    changes.push(format!(
        "Delivery: {} days",
        receipt.estimated_delivery_days
    ));
    if !form.notes.trim().is_empty() {
        changes.push("Notes updated".to_string());
    }
    changes
}
