use protocol_interface::types::error::Error;
use protocol_interface::types::front_end::FrontEnd;
use soroban_sdk::{Address, Env};

use crate::event;
use crate::storage::{read_config, read_deposit, write_front_end};

use super::utils::validation::{
    require_front_end_not_registered, require_user_has_no_deposit, require_valid_kickback_rate,
};

pub fn register_front_end(env: &Env, front_end: &Address, kickback_rate: i128) -> Result<(), Error> {
    front_end.require_auth();

    read_config(env)?;

    require_front_end_not_registered(env, front_end);
    require_user_has_no_deposit(env, &read_deposit(env, front_end));
    require_valid_kickback_rate(env, kickback_rate);

    write_front_end(
        env,
        front_end,
        &FrontEnd {
            kickback_rate,
            registered: true,
        },
    );

    event::front_end_registered(env, front_end, kickback_rate);

    Ok(())
}
