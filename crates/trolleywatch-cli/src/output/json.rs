use serde::Serialize;
use trolleywatch_core::error::TrolleyError;

pub fn print<T: Serialize>(value: &T) -> Result<(), TrolleyError> {
    let json = serde_json::to_string_pretty(value)?;
    println!("{json}");
    Ok(())
}
