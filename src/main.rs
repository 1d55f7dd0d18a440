//! Wallet Ledger CLI
//!
//! Interactive menu over the in-memory wallet ledger: register, login,
//! check balance, add money, send money, and review transaction history.
//!
//! # Usage
//!
//! ```bash
//! cargo run
//! ```
//!
//! # Environment Variables
//!
//! - `RUST_LOG`: Set to `debug` or `warn` to control logging verbosity
//!
//! This layer owns everything the ledger does not: prompting, raw text
//! parsing, wallet-id and PIN format validation, the logged-in session, and
//! output formatting. The ledger only ever sees parsed, well-typed values.

use std::io::{self, BufRead, Write};
use std::process;
use std::str::FromStr;
use wallet_ledger::{AccountId, Amount, Credential, Ledger, LedgerError};

/// How many history entries the menu shows, most recent first.
const HISTORY_DEPTH: usize = 10;

fn main() {
    env_logger::init();

    let stdin = io::stdin();
    let mut cli = Cli::new(stdin.lock());
    if let Err(e) = cli.run() {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

/// Interactive session state: the ledger plus the logged-in account, if any.
struct Cli<R> {
    ledger: Ledger,
    input: R,
    session: Option<AccountId>,
}

impl<R: BufRead> Cli<R> {
    fn new(input: R) -> Self {
        let mut ledger = Ledger::new();
        seed_sample_data(&mut ledger);
        Cli {
            ledger,
            input,
            session: None,
        }
    }

    /// Runs menus until the user exits or input ends.
    fn run(&mut self) -> io::Result<()> {
        loop {
            let keep_going = match self.session.clone() {
                None => self.guest_menu()?,
                Some(account_id) => self.user_menu(&account_id)?,
            };
            if !keep_going {
                return Ok(());
            }
        }
    }

    fn guest_menu(&mut self) -> io::Result<bool> {
        println!();
        println!("=== Wallet Ledger ===");
        println!("1. Register");
        println!("2. Login");
        println!("3. Exit");
        let Some(choice) = self.prompt("Select: ")? else {
            return Ok(false);
        };

        match choice.as_str() {
            "1" => self.register(),
            "2" => self.login(),
            "3" => {
                println!("Exiting. Goodbye!");
                Ok(false)
            }
            _ => {
                println!("Invalid selection.");
                Ok(true)
            }
        }
    }

    fn user_menu(&mut self, account_id: &AccountId) -> io::Result<bool> {
        // Safety: a session id always names a registered account
        let account = self.ledger.account(account_id).expect("session account exists");
        println!();
        println!(
            "=== Welcome, {} ({}) ===",
            account.display_name(),
            account.id()
        );
        println!("1. View Balance");
        println!("2. Add Money");
        println!("3. Send Money");
        println!("4. Transaction History");
        println!("5. Logout");
        let Some(choice) = self.prompt("Select: ")? else {
            return Ok(false);
        };

        match choice.as_str() {
            "1" => {
                self.view_balance(account_id);
                Ok(true)
            }
            "2" => self.add_money(account_id),
            "3" => self.send_money(account_id),
            "4" => {
                self.show_history(account_id);
                Ok(true)
            }
            "5" => {
                self.logout(account_id);
                Ok(true)
            }
            _ => {
                println!("Invalid selection.");
                Ok(true)
            }
        }
    }

    fn register(&mut self) -> io::Result<bool> {
        let Some(name) = self.prompt("Enter full name: ")? else {
            return Ok(false);
        };
        if name.is_empty() {
            println!("Name cannot be empty.");
            return Ok(true);
        }

        let Some(raw_id) = self.prompt("Choose wallet ID (example: name@upi): ")? else {
            return Ok(false);
        };
        let account_id = AccountId::new(&raw_id);
        if !is_valid_wallet_id(account_id.as_str()) {
            println!("Invalid wallet ID format.");
            return Ok(true);
        }

        let Some(pin) = self.prompt("Set 4-digit PIN: ")? else {
            return Ok(false);
        };
        if !is_valid_pin(&pin) {
            println!("PIN must be exactly 4 digits.");
            return Ok(true);
        }

        match self
            .ledger
            .create_account(account_id, &name, Credential::new(pin))
        {
            Ok(_) => println!("Registered successfully. You can now login."),
            Err(LedgerError::DuplicateAccount(_)) => {
                println!("Wallet ID already exists. Try login or choose another wallet ID.");
            }
            Err(e) => println!("Registration failed: {}", e),
        }
        Ok(true)
    }

    fn login(&mut self) -> io::Result<bool> {
        let Some(raw_id) = self.prompt("Enter wallet ID: ")? else {
            return Ok(false);
        };
        let account_id = AccountId::new(&raw_id);
        if self.ledger.account(&account_id).is_err() {
            println!("No account found for this wallet ID.");
            return Ok(true);
        }

        let Some(pin) = self.prompt("Enter PIN: ")? else {
            return Ok(false);
        };
        match self.ledger.authenticate(&account_id, &Credential::new(pin)) {
            Ok(account) => {
                println!("Login successful. Welcome, {}!", account.display_name());
                self.session = Some(account_id);
            }
            Err(LedgerError::InvalidCredential) => println!("Incorrect PIN."),
            Err(e) => println!("Login failed: {}", e),
        }
        Ok(true)
    }

    fn view_balance(&self, account_id: &AccountId) {
        // Safety: a session id always names a registered account
        let account = self.ledger.account(account_id).expect("session account exists");
        println!("Your balance: ₹{}", account.balance());
    }

    fn add_money(&mut self, account_id: &AccountId) -> io::Result<bool> {
        let Some(raw_amount) = self.prompt("Enter amount to add (₹): ")? else {
            return Ok(false);
        };
        let Ok(amount) = Amount::from_str(&raw_amount) else {
            println!("Invalid amount.");
            return Ok(true);
        };

        match self.ledger.deposit(account_id, amount) {
            Ok(new_balance) => {
                println!("₹{} added. New balance: ₹{}", amount, new_balance);
            }
            Err(LedgerError::InvalidAmount(_)) => println!("Amount must be positive."),
            Err(e) => println!("Deposit failed: {}", e),
        }
        Ok(true)
    }

    fn send_money(&mut self, account_id: &AccountId) -> io::Result<bool> {
        let Some(raw_destination) = self.prompt("Enter recipient wallet ID: ")? else {
            return Ok(false);
        };
        let destination = AccountId::new(&raw_destination);

        let Some(raw_amount) = self.prompt("Enter amount to send (₹): ")? else {
            return Ok(false);
        };
        let Ok(amount) = Amount::from_str(&raw_amount) else {
            println!("Invalid amount.");
            return Ok(true);
        };

        let Some(pin) = self.prompt("Enter your 4-digit PIN to confirm: ")? else {
            return Ok(false);
        };

        match self
            .ledger
            .transfer(account_id, &destination, amount, &Credential::new(pin))
        {
            Ok(new_balance) => {
                println!("Transaction successful. Sent ₹{} to {}", amount, destination);
                println!("Your new balance: ₹{}", new_balance);
            }
            Err(LedgerError::SelfTransfer) => println!("Cannot send to yourself."),
            Err(LedgerError::AccountNotFound(_)) => println!("Recipient not found."),
            Err(LedgerError::InvalidAmount(_)) => println!("Amount must be positive."),
            Err(LedgerError::InsufficientBalance { .. }) => println!("Insufficient balance."),
            Err(LedgerError::InvalidCredential) => {
                println!("Incorrect PIN. Transaction cancelled.");
            }
            Err(e) => println!("Transfer failed: {}", e),
        }
        Ok(true)
    }

    fn show_history(&self, account_id: &AccountId) {
        // Safety: a session id always names a registered account
        let account = self.ledger.account(account_id).expect("session account exists");
        println!("=== Transaction History ===");
        for entry in account.recent(HISTORY_DEPTH) {
            println!("{}", entry);
        }
    }

    fn logout(&mut self, account_id: &AccountId) {
        // Safety: a session id always names a registered account
        let account = self.ledger.account(account_id).expect("session account exists");
        println!("Logged out: {}", account.display_name());
        self.session = None;
    }

    /// Prints a prompt and reads one trimmed line. `None` means end of input.
    fn prompt(&mut self, text: &str) -> io::Result<Option<String>> {
        print!("{}", text);
        io::stdout().flush()?;

        let mut buf = String::new();
        if self.input.read_line(&mut buf)? == 0 {
            return Ok(None);
        }
        Ok(Some(buf.trim().to_string()))
    }
}

/// Demo account available out of the box: sample@upi, PIN 1234, ₹1000.
fn seed_sample_data(ledger: &mut Ledger) {
    let id = AccountId::new("sample@upi");
    // Safety: the ledger is empty, so the seed id cannot collide
    ledger
        .create_account(id.clone(), "SampleUser", Credential::new("1234"))
        .expect("empty ledger accepts seed account");
    ledger
        .deposit(&id, Amount::from_str("1000").expect("seed amount parses"))
        .expect("seed deposit is positive");
}

/// Wallet ids follow a `local@domain` shape after normalization.
fn is_valid_wallet_id(id: &str) -> bool {
    let Some((local, domain)) = id.split_once('@') else {
        return false;
    };
    let local_ok = !local.is_empty()
        && local
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || "._+-".contains(c));
    let domain_ok = !domain.is_empty()
        && domain
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || ".-".contains(c));
    local_ok && domain_ok
}

/// PINs are exactly 4 ASCII digits.
fn is_valid_pin(pin: &str) -> bool {
    pin.len() == 4 && pin.chars().all(|c| c.is_ascii_digit())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wallet_id_validation() {
        assert!(is_valid_wallet_id("alice@upi"));
        assert!(is_valid_wallet_id("a.b+c-1@pay.bank"));

        assert!(!is_valid_wallet_id("alice"));
        assert!(!is_valid_wallet_id("@upi"));
        assert!(!is_valid_wallet_id("alice@"));
        assert!(!is_valid_wallet_id("al ice@upi"));
        assert!(!is_valid_wallet_id("alice@up_i"));
        assert!(!is_valid_wallet_id("ali@ce@upi"));
    }

    #[test]
    fn test_pin_validation() {
        assert!(is_valid_pin("0000"));
        assert!(is_valid_pin("1234"));

        assert!(!is_valid_pin("123"));
        assert!(!is_valid_pin("12345"));
        assert!(!is_valid_pin("12a4"));
        assert!(!is_valid_pin(""));
    }
}
