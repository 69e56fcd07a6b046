//! Revenue and royalty split computation
//!
//! Pure functions partitioning a gross sale amount (primary) or a royalty
//! basis-point budget (secondary) among the platform, the artist, and an
//! optional additional payee. Integer arithmetic only; division truncates
//! toward zero, and the artist always receives the exact remainder so the
//! partition conserves the input with no dust loss.

use serde::{Deserialize, Serialize};

use artmint_core::{Address, PaymentConfig, PlatformConfig};

/// One concrete payment obligation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Payout {
    pub to: Address,
    pub amount: u64,
}

/// Partition of one primary sale. A party whose amount is zero carries no
/// address, signalling the settlement layer to skip it entirely.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PrimarySplit {
    pub platform_address: Option<Address>,
    pub platform_amount: u64,
    pub additional_address: Option<Address>,
    pub additional_amount: u64,
    pub artist_address: Option<Address>,
    pub artist_amount: u64,
}

impl PrimarySplit {
    /// Nonzero obligations, in platform / additional / artist order.
    pub fn payouts(&self) -> Vec<Payout> {
        let mut payouts = Vec::new();
        if let Some(to) = &self.platform_address {
            payouts.push(Payout {
                to: to.clone(),
                amount: self.platform_amount,
            });
        }
        if let Some(to) = &self.additional_address {
            payouts.push(Payout {
                to: to.clone(),
                amount: self.additional_amount,
            });
        }
        if let Some(to) = &self.artist_address {
            payouts.push(Payout {
                to: to.clone(),
                amount: self.artist_amount,
            });
        }
        payouts
    }

    pub fn total(&self) -> u64 {
        self.platform_amount + self.additional_amount + self.artist_amount
    }
}

/// One royalty obligation, in basis points of a resale amount.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RoyaltyShare {
    pub recipient: Address,
    pub bps: u64,
}

fn percent_of(amount: u64, percentage: u64) -> u64 {
    (amount as u128 * percentage as u128 / 100) as u64
}

/// Splits `gross` for a primary sale.
///
/// The platform takes its percentage off the top; the additional payee
/// takes its percentage of the remainder; the artist receives whatever is
/// left, never an independently computed percentage.
pub fn primary_split(
    payment: &PaymentConfig,
    platform: &PlatformConfig,
    gross: u64,
) -> PrimarySplit {
    let platform_amount = percent_of(gross, platform.primary_sales_percentage);
    let remainder = gross - platform_amount;
    let additional_amount = percent_of(remainder, payment.additional_primary_percentage);
    let artist_amount = remainder - additional_amount;

    PrimarySplit {
        platform_address: (platform_amount > 0).then(|| platform.primary_sales_address.clone()),
        platform_amount,
        additional_address: (additional_amount > 0)
            .then(|| payment.additional_primary_address.clone()),
        additional_amount,
        artist_address: (artist_amount > 0).then(|| payment.artist_address.clone()),
        artist_amount,
    }
}

/// Royalty shares for a resale of one of the project's tokens.
///
/// The artist-side budget is `royalty_percentage * 100` bps, split with the
/// additional secondary payee by its percentage (truncating; the artist
/// absorbs the division remainder). The platform's flat bps are an
/// additive line item, not carved from the artist budget. Fixed order:
/// artist, additional payee, platform; zero shares are omitted entirely.
pub fn secondary_split(
    payment: &PaymentConfig,
    platform: &PlatformConfig,
    royalty_percentage: u64,
) -> Vec<RoyaltyShare> {
    let total_bps = royalty_percentage * 100;
    let additional_bps = percent_of(total_bps, payment.additional_secondary_percentage);
    let artist_bps = total_bps - additional_bps;

    let mut shares = Vec::new();
    if artist_bps > 0 {
        shares.push(RoyaltyShare {
            recipient: payment.artist_address.clone(),
            bps: artist_bps,
        });
    }
    if additional_bps > 0 {
        shares.push(RoyaltyShare {
            recipient: payment.additional_secondary_address.clone(),
            bps: additional_bps,
        });
    }
    if platform.secondary_sales_bps > 0 {
        shares.push(RoyaltyShare {
            recipient: platform.secondary_sales_address.clone(),
            bps: platform.secondary_sales_bps,
        });
    }
    shares
}
