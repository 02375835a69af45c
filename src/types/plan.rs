//! Settlement plan types
//!
//! A `Plan` is the ordered list of instructions that one atomic transaction
//! will replay: draw the flash loan, run the swap legs, optionally open a
//! leverage position, repay principal plus premium. Order is load-bearing;
//! the assembler refuses anything that does not start with a draw and end
//! with a repay.

use alloy::primitives::{Address, B256, U256};
use serde::Serialize;
use std::str::FromStr;

use super::Venue;

/// Venue-specific routing parameters for a swap leg.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "venue", rename_all = "kebab-case")]
pub enum SwapRoute {
    UniswapV2 { router: Address },
    BalancerV2 { vault: Address, pool_id: B256 },
}

impl SwapRoute {
    pub fn venue(&self) -> Venue {
        match self {
            SwapRoute::UniswapV2 { .. } => Venue::UniswapV2,
            SwapRoute::BalancerV2 { .. } => Venue::BalancerV2,
        }
    }
}

/// One step of the settlement sequence.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum SettlementInstruction {
    FlashLoanDraw {
        pool: Address,
        token: Address,
        amount: U256,
    },
    Swap {
        token_in: Address,
        token_out: Address,
        amount_in: U256,
        route: SwapRoute,
    },
    SupplyCollateral {
        pool: Address,
        token: Address,
        amount: U256,
    },
    Borrow {
        pool: Address,
        token: Address,
        amount: U256,
    },
    FlashLoanRepay {
        pool: Address,
        token: Address,
        amount: U256,
    },
}

/// How the second (sell) swap leg is sized.
///
/// The reference behavior routes only the estimated profit back through the
/// sell venue, leaving the legs unbalanced against the first leg's output.
/// `QuotedOutput` sells the full quoted output instead.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SellLegSizing {
    #[default]
    ProfitEstimate,
    QuotedOutput,
}

impl FromStr for SellLegSizing {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "profit-estimate" => Ok(SellLegSizing::ProfitEstimate),
            "quoted-output" => Ok(SellLegSizing::QuotedOutput),
            other => Err(format!("unknown sell leg sizing: {}", other)),
        }
    }
}

/// Ordered settlement sequence, constructed fresh per cycle and consumed
/// exactly once by the assembler. Not mutable after construction.
#[derive(Debug, Clone, Serialize)]
pub struct Plan {
    instructions: Vec<SettlementInstruction>,
}

impl Plan {
    pub(crate) fn new(instructions: Vec<SettlementInstruction>) -> Self {
        Self { instructions }
    }

    pub fn instructions(&self) -> &[SettlementInstruction] {
        &self.instructions
    }

    pub fn len(&self) -> usize {
        self.instructions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instructions.is_empty()
    }

    /// Draw first, repay last. Replaying a plan in any other order is invalid.
    pub fn is_well_ordered(&self) -> bool {
        matches!(
            self.instructions.first(),
            Some(SettlementInstruction::FlashLoanDraw { .. })
        ) && matches!(
            self.instructions.last(),
            Some(SettlementInstruction::FlashLoanRepay { .. })
        )
    }

    /// Total principal drawn via flash loan.
    pub fn drawn_principal(&self) -> U256 {
        self.instructions
            .iter()
            .filter_map(|ix| match ix {
                SettlementInstruction::FlashLoanDraw { amount, .. } => Some(*amount),
                _ => None,
            })
            .fold(U256::ZERO, |acc, a| acc + a)
    }

    /// Total amount repaid to the flash loan pool.
    pub fn repay_amount(&self) -> U256 {
        self.instructions
            .iter()
            .filter_map(|ix| match ix {
                SettlementInstruction::FlashLoanRepay { amount, .. } => Some(*amount),
                _ => None,
            })
            .fold(U256::ZERO, |acc, a| acc + a)
    }

    pub fn has_leverage_legs(&self) -> bool {
        self.instructions.iter().any(|ix| {
            matches!(
                ix,
                SettlementInstruction::SupplyCollateral { .. }
                    | SettlementInstruction::Borrow { .. }
            )
        })
    }
}
