use soroban_sdk::contracterror;

#[contracterror]
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum MultisigError {
    /// Privileged entrypoint reached outside of proposal execution
    NotAuthorizedCall = 1,
    KeyLenMismatch = 2,
    NoParticipantsToProcess = 3,
    RemovingAllParticipants = 4,
    ZeroTarget = 5,
    ProposalExists = 6,
    ActiveProposal = 7,
    InvalidProof = 8,
    NotVoting = 9,
    UsedBlinder = 10,
    UsedNullifier = 11,
    InvalidCMTRoot = 12,
    VoteCountMismatch = 13,
    ProposalNotAccepted = 14,
    InvalidValue = 15,
    ZeroVerifier = 16,
    NotAContract = 17,
    DuplicateVerifier = 18,
    InvalidQuorum = 19,
    /// Self-targeted payload names no governance operation or has bad arguments
    InvalidPayload = 20,
    ProposalNotFound = 21,
    /// Caller-supplied point is off the curve or has non-canonical coordinates
    InvalidPoint = 22,
}

/// Logs the offending values, then aborts with a contract error.
///
/// `fail!(env, err)` or `fail!(env, err, "message", value, ...)`; `env` must be `&Env`.
macro_rules! fail {
    ($env:expr, $err:expr) => {
        soroban_sdk::panic_with_error!($env, $err)
    };
    ($env:expr, $err:expr, $msg:literal $(, $arg:expr)* $(,)?) => {{
        soroban_sdk::log!($env, $msg $(, $arg)*);
        soroban_sdk::panic_with_error!($env, $err)
    }};
}
