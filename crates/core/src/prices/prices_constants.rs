/// Display code of the fixed quote currency.
pub const QUOTE_CURRENCY_CODE: &str = "EUR";

/// Field name used when reporting a missing coin identifier.
pub const COIN_FIELD: &str = "coin";
