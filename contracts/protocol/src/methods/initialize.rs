use common::FixedI128;
use protocol_interface::types::error::Error;
use protocol_interface::types::fee_state::FeeState;
use protocol_interface::types::pool_ledger::PoolLedger;
use protocol_interface::types::protocol_config::ProtocolConfig;
use protocol_interface::types::redistribution_state::RedistributionState;
use protocol_interface::types::stability_pool_state::StabilityPoolState;
use soroban_sdk::{Address, Env};

use crate::event;
use crate::storage::{
    write_admin, write_config, write_deployment_time, write_fee_state, write_pool_ledger,
    write_redistribution_state, write_stability_pool_state,
};

use super::utils::validation::{require_admin, require_admin_not_exist, require_valid_config};

pub fn initialize(env: &Env, admin: &Address, config: &ProtocolConfig) -> Result<(), Error> {
    require_admin_not_exist(env);
    require_valid_config(env, config);

    let now = env.ledger().timestamp();

    write_admin(env, admin);
    write_config(env, config);
    write_deployment_time(env, now);

    write_stability_pool_state(
        env,
        &StabilityPoolState {
            p: FixedI128::DENOMINATOR,
            current_scale: 0,
            current_epoch: 0,
            total_deposits: 0,
            coll: 0,
            last_reward_error: 0,
            last_coll_error_offset: 0,
            last_debt_loss_error_offset: 0,
        },
    );
    write_redistribution_state(env, &RedistributionState::default());
    write_pool_ledger(env, &PoolLedger::default());
    write_fee_state(
        env,
        &FeeState {
            base_rate: 0,
            last_fee_operation_time: now,
        },
    );

    event::initialized(env, admin);

    Ok(())
}

pub fn set_config(env: &Env, config: &ProtocolConfig) -> Result<(), Error> {
    require_admin(env)?;
    require_valid_config(env, config);

    write_config(env, config);

    event::config_updated(env, config.mcr, config.ccr);

    Ok(())
}
