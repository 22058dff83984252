use protocol_interface::types::error::Error;
use soroban_sdk::{assert_with_error, Address, Env};

use crate::event;
use crate::storage::{read_coll_surplus, read_config, write_coll_surplus};
use crate::types::trove_manager::TroveManager;
use crate::types::vault::Vault;

pub fn claim_collateral(env: &Env, who: &Address) -> Result<(), Error> {
    who.require_auth();

    let config = read_config(env)?;

    let amount = read_coll_surplus(env, who);
    assert_with_error!(env, amount > 0, Error::NoCollateralToClaim);

    let mut trove_manager = TroveManager::new(env, &config)?;
    trove_manager.ledger.decrease_surplus(amount)?;

    write_coll_surplus(env, who, 0);
    trove_manager.write();

    Vault::new(env, &config).send_coll(who, amount);

    event::collateral_claimed(env, who, amount);

    Ok(())
}
