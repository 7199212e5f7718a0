use std::io::{self, BufRead, Write};
use std::str::FromStr;

use rust_decimal::Decimal;
use tracing::Level;

use banksim::config::{self, Config};
use banksim::market::{default_catalog, StockMarket};
use banksim::models::AccountKind;
use banksim::{BankDirectory, Result};

fn main() {
    // Set the log level based on the first argument
    let args: Vec<String> = std::env::args().collect();
    let mut log_level = Level::INFO;
    if args.len() >= 2 {
        log_level = match args[1].as_str() {
            "debug" => Level::DEBUG,
            "warn" => Level::WARN,
            "error" => Level::ERROR,
            _ => Level::INFO,
        };
    }

    // Initalize dotenv so we can read .env file
    dotenv::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_target(false)
        .compact()
        .with_max_level(log_level)
        .init();

    tracing::info!("Log level set to: {}", log_level);

    let settings = Config::from_env();
    tracing::info!("interest rate set to {}", settings.interest_rate);

    let catalog = match settings.catalog_path.as_deref() {
        Some(path) => match config::load_catalog(path) {
            Ok(catalog) => catalog,
            Err(e) => {
                tracing::warn!("could not load catalog from {path}: {e}; using built-in catalog");
                default_catalog()
            }
        },
        None => default_catalog(),
    };
    tracing::info!("market initialized with {} instruments", catalog.len());

    let mut market = StockMarket::with_catalog(catalog);
    let mut bank = BankDirectory::new(&settings);

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    loop {
        display_menu();
        let choice = match read_line(&mut lines) {
            Some(line) => line,
            None => break,
        };

        match choice.trim() {
            "1" => {
                let (Some(id), Some(secret)) = (
                    prompt(&mut lines, "Enter ID: "),
                    prompt(&mut lines, "Enter Password: "),
                ) else {
                    break;
                };
                report(
                    bank.create_account(&id, &secret),
                    &format!("Account successfully created for {id}."),
                );
            }
            "2" => {
                let (Some(id), Some(secret)) = (
                    prompt(&mut lines, "Enter ID: "),
                    prompt(&mut lines, "Enter Password: "),
                ) else {
                    break;
                };
                report(
                    bank.sign_in(&id, &secret),
                    &format!("Successfully signed in as {id}."),
                );
            }
            "3" => {
                let Some((amount, kind)) = prompt_amount_and_kind(&mut lines, "deposit") else {
                    continue;
                };
                report(
                    bank.deposit(amount, kind),
                    &format!("Deposited ${amount:.2} to your {kind} account."),
                );
            }
            "4" => {
                let Some((amount, kind)) = prompt_amount_and_kind(&mut lines, "withdraw") else {
                    continue;
                };
                report(
                    bank.withdraw(amount, kind),
                    &format!("Withdrew ${amount:.2} from your {kind} account."),
                );
            }
            "5" => report(
                bank.apply_interest(),
                "Interest applied to your savings account.",
            ),
            "6" => match bank.balances() {
                Ok(balances) => {
                    println!("Savings Account Balance: ${:.2}", balances.savings);
                    println!("Checking Account Balance: ${:.2}", balances.checking);
                }
                Err(e) => println!("{e}"),
            },
            "7" => report(bank.sign_out(), "Signed out."),
            "8" => {
                println!("\nAvailable Stocks:");
                for quote in market.list_stocks() {
                    println!("{} - ${:.2}", quote.name, quote.price);
                }
            }
            "9" => {
                let Some((name, amount)) =
                    prompt_stock_and_amount(&mut lines, "invest in", "invest")
                else {
                    continue;
                };
                report(
                    bank.buy_stock(&name, amount),
                    &format!("Invested ${amount:.2} in {name}."),
                );
            }
            "10" => {
                let Some((name, amount)) =
                    prompt_stock_and_amount(&mut lines, "divest from", "sell")
                else {
                    continue;
                };
                report(
                    bank.sell_stock(&name, amount),
                    &format!("Divested ${amount:.2} from {name}."),
                );
            }
            "11" => match bank.portfolio() {
                Ok(holdings) => {
                    println!("Stock Investments:");
                    for holding in holdings {
                        println!("{}: ${:.2}", holding.name, holding.invested);
                    }
                }
                Err(e) => println!("{e}"),
            },
            "12" => match bank.transactions() {
                Ok(entries) => {
                    println!("Transaction History:");
                    for entry in entries {
                        println!("{} - {}: ${:.2}", entry.timestamp, entry.kind, entry.amount);
                    }
                }
                Err(e) => println!("{e}"),
            },
            "13" => {
                println!("Exiting the bank system.");
                break;
            }
            _ => println!("Invalid option. Please try again."),
        }
    }
}

fn display_menu() {
    println!("\n*** Bank System Menu ***");
    println!("1. Create Account");
    println!("2. Sign In");
    println!("3. Deposit Money");
    println!("4. Withdraw Money");
    println!("5. Apply Interest");
    println!("6. Display Balances");
    println!("7. Sign Out");
    println!("8. Display Stocks");
    println!("9. Buy Stocks");
    println!("10. Sell Stocks");
    println!("11. Display Investments");
    println!("12. Transaction History");
    println!("13. Exit");
    print!("Select an option: ");
    let _ = io::stdout().flush();
}

fn read_line(lines: &mut impl Iterator<Item = io::Result<String>>) -> Option<String> {
    lines.next()?.ok()
}

fn prompt(
    lines: &mut impl Iterator<Item = io::Result<String>>,
    label: &str,
) -> Option<String> {
    print!("{label}");
    let _ = io::stdout().flush();
    read_line(lines).map(|l| l.trim().to_string())
}

fn prompt_amount_and_kind(
    lines: &mut impl Iterator<Item = io::Result<String>>,
    verb: &str,
) -> Option<(Decimal, AccountKind)> {
    let raw = prompt(lines, &format!("Enter amount to {verb}: "))?;
    let Ok(amount) = Decimal::from_str(&raw) else {
        println!("Invalid amount. Please try again.");
        return None;
    };
    let raw = prompt(lines, "Enter account type (savings/checking): ")?;
    match AccountKind::from_str(&raw) {
        Ok(kind) => Some((amount, kind)),
        Err(e) => {
            println!("{e}");
            None
        }
    }
}

fn prompt_stock_and_amount(
    lines: &mut impl Iterator<Item = io::Result<String>>,
    stock_verb: &str,
    amount_verb: &str,
) -> Option<(String, Decimal)> {
    let name = prompt(lines, &format!("Enter stock name to {stock_verb}: "))?;
    let raw = prompt(lines, &format!("Enter amount to {amount_verb}: "))?;
    match Decimal::from_str(&raw) {
        Ok(amount) => Some((name, amount)),
        Err(_) => {
            println!("Invalid amount. Please try again.");
            None
        }
    }
}

fn report(result: Result<()>, success: &str) {
    match result {
        Ok(()) => println!("{success}"),
        Err(e) => println!("{e}"),
    }
}
