//! Line-oriented menu driving a [`Bank`].
//!
//! Holds no business state: every choice is turned into one registry
//! operation and its result or error is printed. Errors never end the loop;
//! end of input behaves like `q`.

use std::io::{self, BufRead, Write};

use chrono::NaiveDate;
use thiserror::Error;

use bankbranch_accounts::{Account, RecordOutcome};
use bankbranch_clients::RegisterClient;
use bankbranch_core::{AccountNumber, BankError, Clock, Money, TaxId};

use crate::bank::{Bank, TransferRequest};

const MENU: &str = "
================ MENU ================
[d]\tDeposit
[s]\tWithdraw
[e]\tStatement
[nc]\tNew client
[lc]\tList clients
[ncc]\tNew account
[lcc]\tList accounts
[t]\tTransfer
[q]\tQuit
=> ";

const BIRTH_DATE_FORMAT: &str = "%d-%m-%Y";

#[derive(Debug, Error)]
enum CliError {
    #[error(transparent)]
    Bank(#[from] BankError),
    #[error("{0}")]
    Input(String),
    #[error("end of input")]
    Eof,
    #[error(transparent)]
    Io(#[from] io::Error),
}

type CliResult<T> = Result<T, CliError>;

/// Run the menu loop until `q` or end of input.
pub fn run<C, R, W>(bank: &mut Bank<C>, input: R, output: W) -> io::Result<()>
where
    C: Clock,
    R: BufRead,
    W: Write,
{
    Session {
        bank,
        input,
        output,
    }
    .run()
}

struct Session<'b, C: Clock, R, W> {
    bank: &'b mut Bank<C>,
    input: R,
    output: W,
}

impl<C: Clock, R: BufRead, W: Write> Session<'_, C, R, W> {
    fn run(mut self) -> io::Result<()> {
        loop {
            write!(self.output, "{MENU}")?;
            self.output.flush()?;

            let Some(option) = self.read_line()? else {
                break;
            };

            let result = match option.as_str() {
                "d" => self.deposit(),
                "s" => self.withdraw(),
                "e" => self.statement(),
                "nc" => self.new_client(),
                "lc" => self.list_clients(),
                "ncc" => self.new_account(),
                "lcc" => self.list_accounts(),
                "t" => self.transfer(),
                "q" => break,
                _ => Err(CliError::Input(
                    "Invalid operation, please select the desired operation again.".to_string(),
                )),
            };

            match result {
                Ok(()) => {}
                Err(CliError::Eof) => break,
                Err(CliError::Io(err)) => return Err(err),
                Err(err) => writeln!(self.output, "\n@@@ {err} @@@")?,
            }
        }
        self.output.flush()
    }

    fn read_line(&mut self) -> io::Result<Option<String>> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    fn prompt(&mut self, label: &str) -> CliResult<String> {
        write!(self.output, "{label}")?;
        self.output.flush()?;
        self.read_line()?.ok_or(CliError::Eof)
    }

    fn prompt_tax_id(&mut self, label: &str) -> CliResult<TaxId> {
        Ok(TaxId::parse(&self.prompt(label)?)?)
    }

    fn prompt_amount(&mut self, label: &str) -> CliResult<Money> {
        Ok(self.prompt(label)?.parse::<Money>()?)
    }

    /// List the client's accounts and read a 1-based choice.
    fn choose_account(&mut self, tax_id: &TaxId) -> CliResult<AccountNumber> {
        let numbers: Vec<AccountNumber> = {
            let accounts: Vec<&Account> = self.bank.client_accounts(tax_id)?;
            if accounts.is_empty() {
                return Err(BankError::NoAccount(tax_id.to_string()).into());
            }
            writeln!(self.output, "\nAvailable accounts:")?;
            for (i, account) in accounts.iter().enumerate() {
                writeln!(
                    self.output,
                    "[{}] {} - {} (Balance: R$ {})",
                    i + 1,
                    account.branch(),
                    account.number(),
                    account.balance()
                )?;
            }
            accounts.iter().map(|a| a.number()).collect()
        };

        let choice = self.prompt("Choose the account number: ")?;
        choice
            .parse::<usize>()
            .ok()
            .and_then(|i| i.checked_sub(1))
            .and_then(|i| numbers.get(i).copied())
            .ok_or_else(|| CliError::Input(format!("Invalid account choice: {choice:?}")))
    }

    fn deposit(&mut self) -> CliResult<()> {
        let tax_id = self.prompt_tax_id("Client tax id: ")?;
        self.bank.client(&tax_id)?;
        let amount = self.prompt_amount("Deposit amount: ")?;
        let account = self.choose_account(&tax_id)?;

        let receipt = self.bank.deposit(&tax_id, account, amount)?;
        self.report_outcome(receipt.outcome, "Deposit")
    }

    fn withdraw(&mut self) -> CliResult<()> {
        let tax_id = self.prompt_tax_id("Client tax id: ")?;
        self.bank.client(&tax_id)?;
        let amount = self.prompt_amount("Withdrawal amount: ")?;
        let account = self.choose_account(&tax_id)?;

        let receipt = self.bank.withdraw(&tax_id, account, amount)?;
        self.report_outcome(receipt.outcome, "Withdrawal")
    }

    fn report_outcome(&mut self, outcome: RecordOutcome, label: &str) -> CliResult<()> {
        if outcome == RecordOutcome::DuplicateSuppressed {
            writeln!(self.output, "Duplicate transaction detected, not recorded.")?;
        }
        writeln!(self.output, "\n=== {label} completed successfully! ===")?;
        Ok(())
    }

    fn statement(&mut self) -> CliResult<()> {
        let tax_id = self.prompt_tax_id("Client tax id: ")?;
        self.bank.client(&tax_id)?;
        let account = self.choose_account(&tax_id)?;
        let filter = self.prompt("Filter by kind (blank for all): ")?;
        let filter = (!filter.is_empty()).then_some(filter.as_str());

        let statement = self.bank.statement(&tax_id, account, filter)?;
        writeln!(self.output, "\n================ STATEMENT ================")?;
        writeln!(self.output, "{statement}")?;
        writeln!(self.output, "===========================================")?;
        Ok(())
    }

    fn new_client(&mut self) -> CliResult<()> {
        let tax_id = self.prompt("Tax id (digits only): ")?;
        if let Ok(parsed) = TaxId::parse(&tax_id) {
            if self.bank.client(&parsed).is_ok() {
                return Err(BankError::DuplicateTaxId(parsed.to_string()).into());
            }
        }

        let name = self.prompt("Full name: ")?;
        let birth_date = self.prompt("Birth date (dd-mm-yyyy): ")?;
        let birth_date = NaiveDate::parse_from_str(&birth_date, BIRTH_DATE_FORMAT)
            .map_err(|e| CliError::Input(format!("Invalid birth date {birth_date:?}: {e}")))?;
        let address = self.prompt("Address (street, number - district - city/state): ")?;

        self.bank.register_client(RegisterClient {
            name,
            tax_id,
            birth_date,
            address,
        })?;
        writeln!(self.output, "\n=== Client created successfully! ===")?;
        Ok(())
    }

    fn list_clients(&mut self) -> CliResult<()> {
        let clients = self.bank.clients();
        if clients.is_empty() {
            writeln!(self.output, "\nNo clients registered.")?;
            return Ok(());
        }

        writeln!(self.output, "\n=== Clients ===")?;
        for client in clients {
            writeln!(
                self.output,
                "Name: {}, Tax id: {}, Address: {}",
                client.name(),
                client.tax_id(),
                client.address()
            )?;
        }
        writeln!(self.output, "\n=== Total clients: {} ===", clients.len())?;
        Ok(())
    }

    fn new_account(&mut self) -> CliResult<()> {
        let tax_id = self.prompt_tax_id("Client tax id: ")?;
        let number = self.bank.open_checking_account(&tax_id, None)?;
        writeln!(self.output, "\n=== Account {number} created successfully! ===")?;
        Ok(())
    }

    fn list_accounts(&mut self) -> CliResult<()> {
        let cursor = self.bank.list_accounts();
        if cursor.is_empty() {
            writeln!(self.output, "\nNo accounts registered.")?;
            return Ok(());
        }

        let total = cursor.len();
        for snapshot in cursor {
            writeln!(self.output, "{}", "=".repeat(100))?;
            writeln!(self.output, "{snapshot}")?;
        }
        writeln!(self.output, "\n=== Total accounts: {total} ===")?;
        Ok(())
    }

    fn transfer(&mut self) -> CliResult<()> {
        let from_client = self.prompt_tax_id("Sender tax id: ")?;
        self.bank.client(&from_client)?;
        let from_account = self.choose_account(&from_client)?;

        let to_client = self.prompt_tax_id("Recipient tax id: ")?;
        self.bank.client(&to_client)?;
        let to_account = self.choose_account(&to_client)?;

        let amount = self.prompt_amount("Amount to transfer: ")?;
        let receipt = self.bank.transfer(&TransferRequest {
            from_client,
            from_account,
            to_client,
            to_account,
            amount,
        })?;

        writeln!(
            self.output,
            "\n=== Transfer of R$ {} completed successfully! ===",
            receipt.amount
        )?;
        Ok(())
    }
}
