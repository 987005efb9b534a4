/// Price-string parsing and conversion for the storefront.
///
/// Catalog prices are display strings carrying their own currency marker
/// ("12,50€", "$14.99", "£10.00"). The marker decides the conversion rate;
/// arithmetic happens on integer cents so cart totals never accumulate
/// float error.

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Currency {
    Eur,
    Usd,
    Gbp,
}

impl Currency {
    pub fn code(&self) -> &'static str {
        match self {
            Currency::Eur => "EUR",
            Currency::Usd => "USD",
            Currency::Gbp => "GBP",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "EUR" => Some(Currency::Eur),
            "USD" => Some(Currency::Usd),
            "GBP" => Some(Currency::Gbp),
            _ => None,
        }
    }

    /// Rate relative to EUR. One EUR buys this many units of `self`.
    fn per_eur(&self) -> f64 {
        match self {
            Currency::Eur => 1.0,
            Currency::Usd => 1.08,
            Currency::Gbp => 0.85,
        }
    }
}

/// Parses a display price into integer cents plus its currency.
///
/// The currency is picked by string matching on the marker: a `$` or `£`
/// prefix (dot decimals), or a `€` suffix (comma decimals, the shop's
/// home convention). Returns `None` for anything else.
pub fn parse_price(raw: &str) -> Option<(i64, Currency)> {
    let raw = raw.trim();

    if let Some(rest) = raw.strip_prefix('$') {
        return parse_amount(rest.trim(), '.').map(|cents| (cents, Currency::Usd));
    }
    if let Some(rest) = raw.strip_prefix('£') {
        return parse_amount(rest.trim(), '.').map(|cents| (cents, Currency::Gbp));
    }
    if let Some(rest) = raw.strip_suffix('€') {
        return parse_amount(rest.trim(), ',').map(|cents| (cents, Currency::Eur));
    }

    None
}

fn parse_amount(digits: &str, separator: char) -> Option<i64> {
    if digits.is_empty() {
        return None;
    }

    let (whole, fraction) = match digits.split_once(separator) {
        Some((w, f)) => (w, f),
        None => (digits, ""),
    };

    if whole.is_empty() || !whole.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    // At most two fractional digits; "12,5" reads as 12,50.
    if fraction.len() > 2 || !fraction.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }

    let whole: i64 = whole.parse().ok()?;
    let fraction_cents = match fraction.len() {
        0 => 0,
        1 => fraction.parse::<i64>().ok()? * 10,
        _ => fraction.parse::<i64>().ok()?,
    };

    // Amounts too large for cents arithmetic are unparseable, not wrapped.
    whole.checked_mul(100)?.checked_add(fraction_cents)
}

/// Converts an amount in cents between currencies using the fixed rate table.
pub fn convert(cents: i64, from: Currency, to: Currency) -> i64 {
    if from == to {
        return cents;
    }
    let rate = to.per_eur() / from.per_eur();
    (cents as f64 * rate).round() as i64
}

/// Renders cents back into the currency's display convention.
pub fn format_price(cents: i64, currency: Currency) -> String {
    let whole = cents / 100;
    let fraction = (cents % 100).abs();
    match currency {
        Currency::Eur => format!("{whole},{fraction:02}€"),
        Currency::Usd => format!("${whole}.{fraction:02}"),
        Currency::Gbp => format!("£{whole}.{fraction:02}"),
    }
}

/// Sums `(price string, quantity)` pairs into a total in `target`, converting
/// each line from its own currency. Fails on the first unparseable price.
pub fn total_in<'a, I>(lines: I, target: Currency) -> Option<i64>
where
    I: IntoIterator<Item = (&'a str, u32)>,
{
    let mut total = 0i64;
    for (price, quantity) in lines {
        let (cents, currency) = parse_price(price)?;
        let line = convert(cents, currency, target).checked_mul(quantity as i64)?;
        total = total.checked_add(line)?;
    }
    Some(total)
}
