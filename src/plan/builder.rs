//! Settlement plan construction
//!
//! Builds the ordered instruction sequence for one atomic arbitrage
//! transaction. Construction is all-or-nothing: any missing routing
//! parameter or degenerate input aborts before a single instruction is
//! emitted to the caller.

use alloy::primitives::{Address, U256};
use tracing::debug;
use crate::{
    config::FLASH_LOAN_FEE_BPS,
    errors::{BotError, BotResult},
    types::{
        LendingRates, OpportunityVerdict, Plan, SellLegSizing, SettlementInstruction, SwapRoute,
        Venue, VenueRouting,
    },
};

/// Build the settlement plan for a profitable verdict, in fixed order:
/// flash-loan draw, buy leg, sell leg, optional leverage pair, repay.
///
/// The sell leg's size follows `sizing`. The reference behavior
/// (`ProfitEstimate`) routes only the profit estimate back through the sell
/// venue, which does not balance against the buy leg's output; that
/// imbalance is deliberate and surfaced through configuration instead of
/// being silently "corrected" here.
pub fn build_plan(
    principal: U256,
    token_in: Address,
    token_out: Address,
    verdict: &OpportunityVerdict,
    rates: &LendingRates,
    routing: &VenueRouting,
    sizing: SellLegSizing,
) -> BotResult<Plan> {
    if principal.is_zero() {
        return Err(construction_error("principal must be positive"));
    }

    let aave_pool = routing
        .aave_pool
        .ok_or_else(|| construction_error("no flash-loan pool configured"))?;

    let mut instructions = Vec::with_capacity(6);

    instructions.push(SettlementInstruction::FlashLoanDraw {
        pool: aave_pool,
        token: token_in,
        amount: principal,
    });

    if verdict.buy_venue == Venue::UniswapV2 {
        let router = routing
            .uniswap_router
            .ok_or_else(|| construction_error("no uniswap router configured"))?;
        let vault = routing
            .balancer_vault
            .ok_or_else(|| construction_error("no balancer vault configured"))?;
        let pool_id = routing
            .balancer_pool_id
            .ok_or_else(|| construction_error("no balancer pool id configured for pair"))?;

        instructions.push(SettlementInstruction::Swap {
            token_in,
            token_out,
            amount_in: principal,
            route: SwapRoute::UniswapV2 { router },
        });

        let sell_amount = match sizing {
            SellLegSizing::ProfitEstimate => verdict.profit_magnitude(),
            SellLegSizing::QuotedOutput => verdict.buy_leg_out,
        };

        instructions.push(SettlementInstruction::Swap {
            token_in: token_out,
            token_out: token_in,
            amount_in: sell_amount,
            route: SwapRoute::BalancerV2 { vault, pool_id },
        });
    }

    // Opportunistic leverage: only while supplying the output token earns
    // more than borrowing the input token costs. Additive; never blocks the
    // rest of the plan.
    if rates.leverage_is_positive() {
        instructions.push(SettlementInstruction::SupplyCollateral {
            pool: aave_pool,
            token: token_out,
            amount: principal / U256::from(2),
        });
        instructions.push(SettlementInstruction::Borrow {
            pool: aave_pool,
            token: token_in,
            amount: principal / U256::from(4),
        });
    }

    let repay = repay_amount(principal, FLASH_LOAN_FEE_BPS)?;
    instructions.push(SettlementInstruction::FlashLoanRepay {
        pool: aave_pool,
        token: token_in,
        amount: repay,
    });

    debug!(
        "Built plan: {} instructions, principal={}, repay={}",
        instructions.len(),
        principal,
        repay
    );

    Ok(Plan::new(instructions))
}

/// principal x (10000 + fee_bps) / 10000, multiplying before dividing so the
/// premium is never rounded away.
pub fn repay_amount(principal: U256, fee_bps: u64) -> BotResult<U256> {
    principal
        .checked_mul(U256::from(10_000 + fee_bps))
        .map(|scaled| scaled / U256::from(10_000u64))
        .ok_or_else(|| construction_error("repay amount overflows"))
}

fn construction_error(reason: &str) -> BotError {
    BotError::PlanConstruction {
        reason: reason.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy::primitives::I256;
    use proptest::prelude::*;
    use crate::types::{WETH_MAINNET, USDC_MAINNET};

    const ONE_ETH: u128 = 1_000_000_000_000_000_000;

    fn profitable_verdict(profit: u64, buy_leg_out: u64) -> OpportunityVerdict {
        OpportunityVerdict {
            profitable: true,
            profit: I256::try_from(profit).unwrap(),
            buy_venue: Venue::UniswapV2,
            sell_venue: Venue::BalancerV2,
            buy_leg_out: U256::from(buy_leg_out),
        }
    }

    fn rates(supply: u64, borrow: u64) -> LendingRates {
        LendingRates {
            token: USDC_MAINNET,
            supply_rate: U256::from(supply),
            borrow_rate: U256::from(borrow),
        }
    }

    fn build(
        principal: u128,
        rates_in: &LendingRates,
        sizing: SellLegSizing,
    ) -> BotResult<Plan> {
        build_plan(
            U256::from(principal),
            WETH_MAINNET,
            USDC_MAINNET,
            &profitable_verdict(100_000_000, 2_000_000_000),
            rates_in,
            &VenueRouting::mainnet(),
            sizing,
        )
    }

    #[test]
    fn repay_includes_premium() {
        // 1e18 at 9 bps
        let repay = repay_amount(U256::from(ONE_ETH), 9).unwrap();
        assert_eq!(repay, U256::from(1_000_900_000_000_000_000u128));
    }

    #[test]
    fn repay_multiplies_before_dividing() {
        // Small principals would lose the whole premium under divide-first.
        let repay = repay_amount(U256::from(5_000u64), 9).unwrap();
        assert_eq!(repay, U256::from(5_004u64)); // floor(5000 * 10009 / 10000)
    }

    #[test]
    fn plan_is_draw_first_repay_last_without_leverage() {
        let plan = build(ONE_ETH, &rates(1, 2), SellLegSizing::ProfitEstimate).unwrap();

        assert_eq!(plan.len(), 4);
        assert!(plan.is_well_ordered());
        assert!(!plan.has_leverage_legs());
        assert_eq!(plan.drawn_principal(), U256::from(ONE_ETH));
        assert_eq!(plan.repay_amount(), U256::from(1_000_900_000_000_000_000u128));
    }

    #[test]
    fn plan_is_draw_first_repay_last_with_leverage() {
        let plan = build(ONE_ETH, &rates(2, 1), SellLegSizing::ProfitEstimate).unwrap();

        assert_eq!(plan.len(), 6);
        assert!(plan.is_well_ordered());
        assert!(plan.has_leverage_legs());
    }

    #[test]
    fn leverage_legs_are_half_and_quarter_principal() {
        let plan = build(ONE_ETH, &rates(2, 1), SellLegSizing::ProfitEstimate).unwrap();

        let supply: Vec<_> = plan
            .instructions()
            .iter()
            .filter_map(|ix| match ix {
                SettlementInstruction::SupplyCollateral { token, amount, .. } => {
                    Some((*token, *amount))
                }
                _ => None,
            })
            .collect();
        let borrow: Vec<_> = plan
            .instructions()
            .iter()
            .filter_map(|ix| match ix {
                SettlementInstruction::Borrow { token, amount, .. } => Some((*token, *amount)),
                _ => None,
            })
            .collect();

        assert_eq!(supply, vec![(USDC_MAINNET, U256::from(ONE_ETH / 2))]);
        assert_eq!(borrow, vec![(WETH_MAINNET, U256::from(ONE_ETH / 4))]);

        // Supply precedes borrow
        let supply_pos = plan.instructions().iter().position(|ix| {
            matches!(ix, SettlementInstruction::SupplyCollateral { .. })
        });
        let borrow_pos = plan.instructions().iter().position(|ix| {
            matches!(ix, SettlementInstruction::Borrow { .. })
        });
        assert!(supply_pos < borrow_pos);
    }

    #[test]
    fn equal_rates_emit_no_leverage() {
        let plan = build(ONE_ETH, &rates(5, 5), SellLegSizing::ProfitEstimate).unwrap();
        assert!(!plan.has_leverage_legs());
    }

    #[test]
    fn sell_leg_sized_to_profit_estimate_by_default() {
        let plan = build(ONE_ETH, &rates(1, 2), SellLegSizing::ProfitEstimate).unwrap();

        match &plan.instructions()[2] {
            SettlementInstruction::Swap { amount_in, route, .. } => {
                assert_eq!(route.venue(), Venue::BalancerV2);
                assert_eq!(*amount_in, U256::from(100_000_000u64));
            }
            other => panic!("expected balancer sell leg, got {:?}", other),
        }
    }

    #[test]
    fn sell_leg_sized_to_quoted_output_when_configured() {
        let plan = build(ONE_ETH, &rates(1, 2), SellLegSizing::QuotedOutput).unwrap();

        match &plan.instructions()[2] {
            SettlementInstruction::Swap { amount_in, .. } => {
                assert_eq!(*amount_in, U256::from(2_000_000_000u64));
            }
            other => panic!("expected balancer sell leg, got {:?}", other),
        }
    }

    #[test]
    fn zero_principal_aborts_construction() {
        let err = build(0, &rates(1, 2), SellLegSizing::ProfitEstimate).unwrap_err();
        assert!(matches!(err, BotError::PlanConstruction { .. }));
    }

    #[test]
    fn missing_balancer_pool_id_aborts_construction() {
        let routing = VenueRouting {
            balancer_pool_id: None,
            ..VenueRouting::mainnet()
        };
        let result = build_plan(
            U256::from(ONE_ETH),
            WETH_MAINNET,
            USDC_MAINNET,
            &profitable_verdict(100_000_000, 2_000_000_000),
            &rates(1, 2),
            &routing,
            SellLegSizing::ProfitEstimate,
        );

        assert!(matches!(result, Err(BotError::PlanConstruction { .. })));
    }

    proptest! {
        #[test]
        fn repay_never_less_than_principal(principal in 1u128..=u128::MAX / 10_009) {
            let repay = repay_amount(U256::from(principal), 9).unwrap();
            prop_assert!(repay >= U256::from(principal));
            prop_assert_eq!(repay, U256::from(principal * 10_009 / 10_000));
        }

        #[test]
        fn plan_order_holds_for_any_rates(
            principal in 1u128..=u128::MAX / 10_009,
            supply in 0u64..1000,
            borrow in 0u64..1000,
        ) {
            let plan = build(principal, &rates(supply, borrow), SellLegSizing::ProfitEstimate).unwrap();
            prop_assert!(plan.is_well_ordered());
            prop_assert_eq!(plan.has_leverage_legs(), supply > borrow);
        }
    }
}
