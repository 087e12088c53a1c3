// ============================================================================
// Basic Usage Example
// ============================================================================

use defi_decimal::prelude::*;

fn main() {
    #[cfg(feature = "logging")]
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    println!("=== DeFi Decimal Example ===\n");

    // Raw balance of an 8-decimal cToken
    let raw_balance = DecimalAmount::from(12_345_678_901u64);
    let tokens = raw_balance.to_full_decimals(8);
    println!("Balance: {} raw units = {} cTokens", raw_balance, tokens);

    // Exchange rate 0.020123 in WAD fixed point
    let exchange_rate = DecimalAmount::from("0.020123").to_basic_units(WAD_DECIMALS);
    let underlying = tokens.to_underlying(&exchange_rate);
    println!(
        "Exchange rate {} -> {} underlying",
        exchange_rate.remove_scientific_notation(),
        underlying
    );

    // Value in USD
    let price = DecimalAmount::from("3012.45");
    let usd = underlying.to_usd(&price);
    println!("Value: ${}", usd.to_safe_fixed(2, RoundingMode::HalfUp));

    // Convert back
    let tokens_back = usd.from_usd(&price).to_tokens(&exchange_rate);
    println!("Round trip: {} cTokens", tokens_back.to_safe_fixed(8, RoundingMode::HalfUp));

    // Interest rates
    println!("\n=== Rates ===");
    let config = DecimalConfig::default().with_pow_precision(40);
    for apr in ["0.01", "0.05", "0.25"] {
        let apr = DecimalAmount::from(apr);
        let apy = apr.to_apy_with(&config);
        println!(
            "APR {}% -> APY {}%",
            apr.multiply(100),
            apy.multiply(100).to_safe_fixed(4, RoundingMode::HalfUp)
        );
    }

    // Sentinel handling
    println!("\n=== Safe Output ===");
    let broken = DecimalAmount::from(1).to_tokens(0);
    println!("1 / rate 0 = {} (safe: {})", broken, broken.to_safe_string());
    let tiny = DecimalAmount::from("1e-12");
    println!("{} renders as {}", tiny, tiny.remove_scientific_notation());
}
