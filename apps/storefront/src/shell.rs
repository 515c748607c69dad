//! # Storefront Shell
//!
//! The terminal view layer: one command per line, screens written to the
//! output, cart badge in the prompt.
//!
//! ## Screens
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  storefront [cart: 2 | $14.99]> products                                │
//! │                                                                         │
//! │     #1     $109.95  Fjallraven - Foldsack No. 1 Backpack                │
//! │     #2      $22.30  Mens Casual Premium Slim Fit T-Shirts               │
//! │                                                                         │
//! │  products            catalog list                                       │
//! │  show <id>           product detail                                     │
//! │  new / edit <id>     add / edit form (one prompt per field)             │
//! │  delete <id>         asks for confirmation unless --yes                 │
//! │  cart ...            cart screen and cart mutations                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Pending Requests
//! Each loading screen owns a [`RequestSlot`]. Ctrl-C while a request is
//! pending discards the slot and drops the call; the shell returns to the
//! prompt and nothing is written into the abandoned screen.
//!
//! ## Ctrl-C Elsewhere
//! Once a request has listened for Ctrl-C the process keeps its signal
//! handler, so every read listens too. Ctrl-C abandons a form or a
//! confirmation question, and at the prompt it leaves the shell.

use std::future::Future;
use std::io::{self, Write};
use std::pin::Pin;

use clap::{Parser, Subcommand};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, Lines};
use tracing::{debug, info};

use storefront_core::{CartEntry, Product, ProductForm, RequestSlot, RequestState};

use crate::commands::{cart, product};
use crate::error::ApiError;
use crate::state::{CartState, CatalogState};

/// Source of "stop waiting" signals for pending requests.
///
/// Called once per request; the request is abandoned if the returned future
/// completes first.
pub type Interrupt = Box<dyn FnMut() -> Pin<Box<dyn Future<Output = ()>>>>;

/// Interrupts on Ctrl-C.
pub fn ctrl_c() -> Interrupt {
    Box::new(|| -> Pin<Box<dyn Future<Output = ()>>> {
        Box::pin(async {
            // No handler could be installed: never interrupt.
            if tokio::signal::ctrl_c().await.is_err() {
                std::future::pending::<()>().await;
            }
        })
    })
}

// =============================================================================
// Command Grammar
// =============================================================================

#[derive(Debug, Parser)]
#[command(
    name = "storefront",
    no_binary_name = true,
    disable_help_flag = true,
    disable_version_flag = true,
    disable_help_subcommand = true
)]
struct ShellLine {
    #[command(subcommand)]
    command: ShellCommand,
}

#[derive(Debug, Subcommand)]
enum ShellCommand {
    /// List every product in the catalog
    #[command(alias = "ls")]
    Products,
    /// Show one product
    Show { id: String },
    /// Add a new product
    New,
    /// Edit a product
    Edit { id: String },
    /// Delete a product
    Delete {
        id: String,
        /// Skip the confirmation question
        #[arg(long, short)]
        yes: bool,
    },
    /// Show the cart
    Cart,
    /// Add a product to the cart
    CartAdd { id: String },
    /// Remove every cart entry of a product
    CartRemove { id: String },
    /// Remove a single cart entry
    CartDrop { entry_id: String },
    /// List commands
    Help,
    /// Leave the storefront
    #[command(alias = "exit")]
    Quit,
}

const HELP: &str = "\
Commands:
  products              list the catalog
  show <id>             product details
  new                   add a product
  edit <id>             edit a product
  delete <id> [--yes]   delete a product
  cart                  show the cart
  cart-add <id>         add a product to the cart
  cart-remove <id>      remove every entry of a product from the cart
  cart-drop <entry-id>  remove one cart entry
  help                  this list
  quit                  leave (Ctrl-D or Ctrl-C work too)

Ctrl-C cancels a request that is still loading or a form being filled in.";

const NOT_PERSISTED: &str = "(Note: the catalog service won't persist this.)";

/// One read from the terminal.
#[derive(Debug, PartialEq, Eq)]
enum Input {
    Line(String),
    End,
    Interrupted,
}

#[derive(Debug, PartialEq, Eq)]
enum Flow {
    Continue,
    Quit,
}

// =============================================================================
// Shell
// =============================================================================

/// Interactive storefront over any line input and any output.
pub struct Shell<R, W> {
    catalog: CatalogState,
    cart: CartState,
    input: Lines<R>,
    out: W,
    interrupt: Interrupt,
    listing: RequestSlot<Vec<Product>>,
    detail: RequestSlot<Product>,
    editor: RequestSlot<ProductForm>,
}

impl<R, W> Shell<R, W>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    pub fn new(catalog: CatalogState, cart: CartState, input: R, out: W) -> Self {
        Shell {
            catalog,
            cart,
            input: input.lines(),
            out,
            interrupt: ctrl_c(),
            listing: RequestSlot::new(),
            detail: RequestSlot::new(),
            editor: RequestSlot::new(),
        }
    }

    /// Replaces the Ctrl-C interrupt.
    pub fn with_interrupt(mut self, interrupt: Interrupt) -> Self {
        self.interrupt = interrupt;
        self
    }

    /// Reads and runs commands until `quit` or end of input.
    pub async fn run(&mut self) -> io::Result<()> {
        writeln!(self.out, "Storefront. Type `help` for commands.")?;

        loop {
            self.prompt()?;

            let line = match read_line(&mut self.input, &mut self.interrupt).await? {
                Input::Line(line) => line,
                Input::End => {
                    writeln!(self.out)?;
                    break;
                }
                Input::Interrupted => {
                    debug!("Interrupted at the prompt");
                    writeln!(self.out)?;
                    break;
                }
            };

            let line = line.trim();
            if line.is_empty() {
                continue;
            }

            match ShellLine::try_parse_from(line.split_whitespace()) {
                Ok(parsed) => {
                    if self.dispatch(parsed.command).await? == Flow::Quit {
                        break;
                    }
                }
                Err(err) => {
                    debug!(line, "Unparseable shell line");
                    writeln!(self.out, "{}", err.render().to_string().trim_end())?;
                }
            }
        }

        info!("Shell closed");
        Ok(())
    }

    async fn dispatch(&mut self, command: ShellCommand) -> io::Result<Flow> {
        match command {
            ShellCommand::Products => self.show_catalog().await?,
            ShellCommand::Show { id } => self.show_product(&id).await?,
            ShellCommand::New => self.add_product().await?,
            ShellCommand::Edit { id } => self.edit_product(&id).await?,
            ShellCommand::Delete { id, yes } => self.delete_product(&id, yes).await?,
            ShellCommand::Cart => self.show_cart()?,
            ShellCommand::CartAdd { id } => self.cart_add(&id).await?,
            ShellCommand::CartRemove { id } => self.cart_remove(&id)?,
            ShellCommand::CartDrop { entry_id } => self.cart_drop(&entry_id)?,
            ShellCommand::Help => writeln!(self.out, "{}", HELP)?,
            ShellCommand::Quit => return Ok(Flow::Quit),
        }
        Ok(Flow::Continue)
    }

    fn prompt(&mut self) -> io::Result<()> {
        let badge = self.cart.summary();
        write!(self.out, "storefront [cart: {} | ${}]> ", badge.count, badge.total)?;
        self.out.flush()
    }

    // =========================================================================
    // Catalog Screens
    // =========================================================================

    async fn show_catalog(&mut self) -> io::Result<()> {
        writeln!(self.out, "Loading products...")?;

        let call = product::list_products(&self.catalog);
        match load(&mut self.listing, &mut self.interrupt, call).await {
            None => writeln!(self.out, "Cancelled.")?,
            Some(RequestState::Failed(reason)) => writeln!(self.out, "{}", reason)?,
            Some(RequestState::Succeeded(products)) if products.is_empty() => {
                writeln!(self.out, "No products found.")?
            }
            Some(RequestState::Succeeded(products)) => {
                for p in &products {
                    writeln!(
                        self.out,
                        "{:>6}  {:>10}  {}",
                        format!("#{}", p.id),
                        p.price.to_string(),
                        p.title
                    )?;
                }
                writeln!(self.out, "{} products.", products.len())?;
            }
            Some(RequestState::Pending) => {}
        }
        Ok(())
    }

    async fn show_product(&mut self, id: &str) -> io::Result<()> {
        writeln!(self.out, "Loading product...")?;

        let call = product::get_product(&self.catalog, id);
        match load(&mut self.detail, &mut self.interrupt, call).await {
            None => writeln!(self.out, "Cancelled.")?,
            Some(RequestState::Failed(reason)) => writeln!(self.out, "{}", reason)?,
            Some(RequestState::Succeeded(p)) => {
                writeln!(self.out, "{}", p.title)?;
                writeln!(self.out, "{}  ({})", p.price, p.category)?;
                writeln!(self.out, "{}", p.description)?;
                writeln!(self.out, "Image: {}", p.image)?;
                writeln!(
                    self.out,
                    "cart-add {id} | edit {id} | delete {id}",
                    id = p.id
                )?;
            }
            Some(RequestState::Pending) => {}
        }
        Ok(())
    }

    // =========================================================================
    // Product Forms
    // =========================================================================

    async fn add_product(&mut self) -> io::Result<()> {
        writeln!(self.out, "Add New Product")?;

        let Some(form) = self.fill_form(ProductForm::default()).await? else {
            return Ok(());
        };

        writeln!(self.out, "Submitting...")?;
        let call = product::create_product(&self.catalog, form);
        match interruptible(&mut self.interrupt, call).await {
            None => writeln!(self.out, "Cancelled.")?,
            Some(Ok(created)) => {
                writeln!(self.out, "Product successfully \"added\"! {}", NOT_PERSISTED)?;
                writeln!(self.out, "The service assigned id {}.", created.id)?;
            }
            Some(Err(err)) => self.report(&err)?,
        }
        Ok(())
    }

    async fn edit_product(&mut self, id: &str) -> io::Result<()> {
        writeln!(self.out, "Loading product...")?;

        let call = product::load_product_form(&self.catalog, id);
        let form = match load(&mut self.editor, &mut self.interrupt, call).await {
            None => return writeln!(self.out, "Cancelled."),
            Some(RequestState::Failed(reason)) => return writeln!(self.out, "{}", reason),
            Some(RequestState::Succeeded(form)) => form,
            Some(RequestState::Pending) => return Ok(()),
        };

        writeln!(self.out, "Edit Product (press Enter to keep a value)")?;
        let Some(form) = self.fill_form(form).await? else {
            return Ok(());
        };

        writeln!(self.out, "Saving...")?;
        let call = product::update_product(&self.catalog, id, form);
        match interruptible(&mut self.interrupt, call).await {
            None => writeln!(self.out, "Cancelled.")?,
            Some(Ok(_)) => {
                writeln!(self.out, "Product updated successfully! {}", NOT_PERSISTED)?
            }
            Some(Err(err)) => self.report(&err)?,
        }
        Ok(())
    }

    async fn delete_product(&mut self, id: &str, confirmed: bool) -> io::Result<()> {
        if !confirmed
            && !self
                .confirm("Are you sure you want to delete this product?")
                .await?
        {
            return Ok(());
        }

        let call = product::delete_product(&self.catalog, id);
        match interruptible(&mut self.interrupt, call).await {
            None => writeln!(self.out, "Cancelled.")?,
            Some(Ok(())) => writeln!(
                self.out,
                "Product deleted successfully. {}",
                NOT_PERSISTED
            )?,
            Some(Err(err)) => self.report(&err)?,
        }
        Ok(())
    }

    /// Prompts for every field until the form validates.
    ///
    /// Returns `None` when the user gives up or input ends.
    async fn fill_form(&mut self, mut form: ProductForm) -> io::Result<Option<ProductForm>> {
        loop {
            let fields: [(&str, &mut String); 4] = [
                ("Product Title", &mut form.title),
                ("Price", &mut form.price),
                ("Description", &mut form.description),
                ("Category", &mut form.category),
            ];

            for (label, value) in fields {
                let answer = ask(
                    &mut self.input,
                    &mut self.out,
                    &mut self.interrupt,
                    label,
                    value.as_str(),
                )
                .await?;

                match answer {
                    Input::Line(answer) => *value = answer,
                    Input::End => return Ok(None),
                    Input::Interrupted => {
                        self.cancelled()?;
                        return Ok(None);
                    }
                }
            }

            match form.validate() {
                Ok(_) => return Ok(Some(form)),
                Err(err) => {
                    writeln!(self.out, "{}", err)?;
                    if !self.confirm("Edit the form again?").await? {
                        return Ok(None);
                    }
                }
            }
        }
    }

    async fn confirm(&mut self, question: &str) -> io::Result<bool> {
        write!(self.out, "{} [y/N]: ", question)?;
        self.out.flush()?;

        match read_line(&mut self.input, &mut self.interrupt).await? {
            Input::Line(answer) => Ok(matches!(
                answer.trim().to_ascii_lowercase().as_str(),
                "y" | "yes"
            )),
            Input::End => Ok(false),
            Input::Interrupted => {
                self.cancelled()?;
                Ok(false)
            }
        }
    }

    /// Ends the half-written line of an abandoned question.
    fn cancelled(&mut self) -> io::Result<()> {
        writeln!(self.out)?;
        writeln!(self.out, "Cancelled.")
    }

    fn report(&mut self, err: &ApiError) -> io::Result<()> {
        writeln!(self.out, "{}", err.message)
    }

    // =========================================================================
    // Cart Screen
    // =========================================================================

    fn show_cart(&mut self) -> io::Result<()> {
        let response = cart::get_cart(&self.cart);

        if response.entries.is_empty() {
            return writeln!(self.out, "Your cart is empty.");
        }

        writeln!(self.out, "Your Cart")?;
        for entry in &response.entries {
            write_entry(&mut self.out, entry)?;
        }
        writeln!(self.out, "Total: ${}", response.summary.total)
    }

    async fn cart_add(&mut self, id: &str) -> io::Result<()> {
        let call = cart::add_to_cart(&self.catalog, &self.cart, id);
        match interruptible(&mut self.interrupt, call).await {
            None => writeln!(self.out, "Cancelled.")?,
            Some(Ok(response)) => {
                if let Some(entry) = response.entries.last() {
                    writeln!(self.out, "Added \"{}\" to the cart.", entry.product.title)?;
                }
            }
            Some(Err(err)) => self.report(&err)?,
        }
        Ok(())
    }

    fn cart_remove(&mut self, id: &str) -> io::Result<()> {
        match cart::remove_from_cart(&self.cart, id) {
            Ok(response) => writeln!(
                self.out,
                "Removed {} item(s) from the cart.",
                response.removed
            ),
            Err(err) => self.report(&err),
        }
    }

    fn cart_drop(&mut self, entry_id: &str) -> io::Result<()> {
        match cart::remove_cart_entry(&self.cart, entry_id) {
            Ok(_) => writeln!(self.out, "Removed 1 item from the cart."),
            Err(err) => self.report(&err),
        }
    }
}

// =============================================================================
// Helpers
// =============================================================================

/// Awaits `call` unless the interrupt fires first.
async fn interruptible<T, F>(interrupt: &mut Interrupt, call: F) -> Option<T>
where
    F: Future<Output = T>,
{
    let interrupted = interrupt();
    tokio::select! {
        biased;
        _ = interrupted => None,
        value = call => Some(value),
    }
}

/// Reads one line, or reports the interrupt if it fires while no input is
/// ready.
async fn read_line<R>(input: &mut Lines<R>, interrupt: &mut Interrupt) -> io::Result<Input>
where
    R: AsyncBufRead + Unpin,
{
    let interrupted = interrupt();
    tokio::select! {
        biased;
        line = input.next_line() => Ok(line?.map_or(Input::End, Input::Line)),
        _ = interrupted => Ok(Input::Interrupted),
    }
}

/// Runs `call` through `slot` and returns the settled state.
///
/// `None` means the request was interrupted and the slot discarded.
async fn load<T, F>(
    slot: &mut RequestSlot<T>,
    interrupt: &mut Interrupt,
    call: F,
) -> Option<RequestState<T>>
where
    F: Future<Output = Result<T, ApiError>>,
{
    let ticket = slot.begin();

    match interruptible(interrupt, call).await {
        Some(result) => {
            slot.settle(ticket, result.map_err(|e| e.message));
            slot.take_settled()
        }
        None => {
            debug!("Request interrupted, discarding its result");
            slot.discard();
            None
        }
    }
}

/// Prompts for one field. Enter keeps `current`.
async fn ask<R, W>(
    input: &mut Lines<R>,
    out: &mut W,
    interrupt: &mut Interrupt,
    label: &str,
    current: &str,
) -> io::Result<Input>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    if current.is_empty() {
        write!(out, "{}: ", label)?;
    } else {
        write!(out, "{} [{}]: ", label, current)?;
    }
    out.flush()?;

    Ok(match read_line(input, interrupt).await? {
        Input::Line(line) if line.trim().is_empty() => Input::Line(current.to_string()),
        Input::Line(line) => Input::Line(line.trim().to_string()),
        other => other,
    })
}

fn write_entry<W: Write>(out: &mut W, entry: &CartEntry) -> io::Result<()> {
    writeln!(
        out,
        "  {}  #{:<4} {:>10}  {}",
        entry.entry_id,
        entry.product_id(),
        entry.price().to_string(),
        entry.product.title
    )
}

// =============================================================================
// Unit Tests
// =============================================================================
