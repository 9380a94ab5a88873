// This file is part of Minter.
//
// Minter is free software: you can redistribute it and/or modify it under the
// terms of the GNU Lesser General Public License as published by the Free Software
// Foundation, either version 3 of the License, or (at your option) any later version.
//
// Minter is distributed in the hope that it will be useful, but WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.
// See the GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License along with Minter.
// If not, see https://www.gnu.org/licenses/.

//! Call policies restricting what a permission validator may sign.
//!
//! The policy module enforces these rules onchain. [`CallPolicy::check_call`]
//! applies the same rules locally so a restricted signer never signs an
//! operation the account would reject.

use alloy_primitives::{address, Address, Bytes, FixedBytes, B256, U256};
use alloy_sol_types::{SolCall, SolValue};
use minter_contracts::policy as contracts;

use crate::Call;

const CALL_POLICY_V0_0_2_ADDRESS: Address = address!("e4Fec84B7B002273ecC86baa65a831ddB92d30a8");

/// Call policy module version
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum CallPolicyVersion {
    /// v0.0.2, supports value limits and argument rules
    #[default]
    V0_0_2,
}

impl CallPolicyVersion {
    /// Deployment of this policy module
    pub fn address(&self) -> Address {
        match self {
            CallPolicyVersion::V0_0_2 => CALL_POLICY_V0_0_2_ADDRESS,
        }
    }
}

/// How the account executes a permitted call
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
#[repr(u8)]
pub enum CallType {
    /// Regular call
    #[default]
    Call = 0x00,
    /// Delegate call
    DelegateCall = 0xff,
}

/// Comparison applied between a call argument and the rule parameters
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[repr(u8)]
pub enum ParamCondition {
    /// argument == params[0]
    Equal = 0,
    /// argument > params[0]
    GreaterThan = 1,
    /// argument < params[0]
    LessThan = 2,
    /// argument >= params[0]
    GreaterThanOrEqual = 3,
    /// argument <= params[0]
    LessThanOrEqual = 4,
    /// argument != params[0]
    NotEqual = 5,
    /// argument is one of params
    OneOf = 6,
}

/// Rule on one 32-byte word of the call arguments
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ParamRule {
    /// Comparison to apply
    pub condition: ParamCondition,
    /// Byte offset of the word, relative to the start of the arguments
    pub offset: u64,
    /// Values to compare against
    pub params: Vec<B256>,
}

impl ParamRule {
    /// Rule comparing the `index`-th static argument
    pub fn for_argument(index: u64, condition: ParamCondition, params: Vec<B256>) -> Self {
        Self {
            condition,
            // an overflowing offset never matches any call data
            offset: index.saturating_mul(32),
            params,
        }
    }

    fn check(&self, data: &[u8]) -> bool {
        let Some(word) = usize::try_from(self.offset)
            .ok()
            .and_then(|offset| offset.checked_add(4))
            .and_then(|start| Some(start..start.checked_add(32)?))
            .and_then(|range| data.get(range))
        else {
            return false;
        };
        let arg = U256::from_be_slice(word);
        let Some(first) = self.params.first() else {
            return false;
        };
        let param = U256::from_be_bytes(first.0);

        match self.condition {
            ParamCondition::Equal => arg == param,
            ParamCondition::GreaterThan => arg > param,
            ParamCondition::LessThan => arg < param,
            ParamCondition::GreaterThanOrEqual => arg >= param,
            ParamCondition::LessThanOrEqual => arg <= param,
            ParamCondition::NotEqual => arg != param,
            ParamCondition::OneOf => self.params.iter().any(|p| U256::from_be_bytes(p.0) == arg),
        }
    }
}

/// One allowed (target, function) pair
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Permission {
    /// How the call is executed
    pub call_type: CallType,
    /// Allowed target, zero allows any target
    pub target: Address,
    /// Allowed function selector
    pub selector: FixedBytes<4>,
    /// Maximum native value per call
    pub value_limit: U256,
    /// Argument rules, all must pass
    pub rules: Vec<ParamRule>,
}

impl Permission {
    /// Permission to call function `C` on `target`, without value
    pub fn for_function<C: SolCall>(target: Address) -> Self {
        Self::new(target, FixedBytes::from(C::SELECTOR))
    }

    fn new(target: Address, selector: FixedBytes<4>) -> Self {
        Self {
            call_type: CallType::Call,
            target,
            selector,
            value_limit: U256::ZERO,
            rules: vec![],
        }
    }

    /// Set the value limit
    pub fn with_value_limit(mut self, value_limit: U256) -> Self {
        self.value_limit = value_limit;
        self
    }

    /// Add an argument rule
    pub fn with_rule(mut self, rule: ParamRule) -> Self {
        self.rules.push(rule);
        self
    }

    fn matches(&self, call: &Call) -> bool {
        (self.target.is_zero() || self.target == call.to)
            && call.selector() == Some(self.selector.0)
    }

    fn check(&self, call: &Call) -> Result<(), PolicyViolation> {
        if call.value > self.value_limit {
            return Err(PolicyViolation::ValueLimitExceeded {
                value: call.value,
                limit: self.value_limit,
            });
        }
        for rule in &self.rules {
            if !rule.check(&call.data) {
                return Err(PolicyViolation::ArgumentRule {
                    offset: rule.offset,
                    condition: rule.condition,
                });
            }
        }
        Ok(())
    }

    fn to_contract(&self) -> contracts::Permission {
        contracts::Permission {
            callType: FixedBytes::from([self.call_type as u8]),
            target: self.target,
            selector: self.selector,
            valueLimit: self.value_limit,
            rules: self
                .rules
                .iter()
                .map(|r| contracts::ParamRule {
                    condition: r.condition as u8,
                    offset: r.offset,
                    params: r.params.clone(),
                })
                .collect(),
        }
    }
}

/// Allow-list of calls a permission validator may sign
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CallPolicy {
    version: CallPolicyVersion,
    permissions: Vec<Permission>,
}

impl CallPolicy {
    /// Create a policy, failing on parameters the module would reject
    pub fn new(
        version: CallPolicyVersion,
        permissions: Vec<Permission>,
    ) -> Result<Self, PolicyError> {
        if permissions.is_empty() {
            return Err(PolicyError::NoPermissions);
        }
        for p in &permissions {
            if p.selector.is_zero() {
                return Err(PolicyError::ZeroSelector(p.target));
            }
            if p.rules.iter().any(|r| r.params.is_empty()) {
                return Err(PolicyError::EmptyRuleParams(p.target));
            }
        }
        Ok(Self {
            version,
            permissions,
        })
    }

    /// Module version
    pub fn version(&self) -> CallPolicyVersion {
        self.version
    }

    /// Policy module address
    pub fn address(&self) -> Address {
        self.version.address()
    }

    /// Allowed calls
    pub fn permissions(&self) -> &[Permission] {
        &self.permissions
    }

    /// Install data for the policy module
    pub fn policy_data(&self) -> Bytes {
        self.permissions
            .iter()
            .map(Permission::to_contract)
            .collect::<Vec<_>>()
            .abi_encode()
            .into()
    }

    /// Check a call against the policy.
    ///
    /// A call passes if any permission matching its target and selector
    /// accepts its value and arguments.
    pub fn check_call(&self, call: &Call) -> Result<(), PolicyViolation> {
        let mut violation = None;
        for permission in self.permissions.iter().filter(|p| p.matches(call)) {
            match permission.check(call) {
                Ok(()) => return Ok(()),
                Err(e) => violation = violation.or(Some(e)),
            }
        }

        Err(violation.unwrap_or(PolicyViolation::NotPermitted {
            target: call.to,
            selector: call.selector().map(FixedBytes::from),
        }))
    }
}

/// Invalid policy parameters
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum PolicyError {
    /// A policy without permissions allows nothing
    #[error("call policy has no permissions")]
    NoPermissions,
    /// Zero selector
    #[error("permission for {0} has a zero selector")]
    ZeroSelector(Address),
    /// Rule without parameters
    #[error("permission for {0} has a rule without parameters")]
    EmptyRuleParams(Address),
}

/// A call rejected by a policy
#[derive(Debug, thiserror::Error, Clone, PartialEq, Eq)]
pub enum PolicyViolation {
    /// No permission covers the call's target and selector
    #[error("call to {target} with selector {selector:?} is not permitted")]
    NotPermitted {
        /// Call target
        target: Address,
        /// Call selector, if present
        selector: Option<FixedBytes<4>>,
    },
    /// Value above the permission's limit
    #[error("call value {value} exceeds limit {limit}")]
    ValueLimitExceeded {
        /// Call value
        value: U256,
        /// Permission limit
        limit: U256,
    },
    /// An argument rule failed
    #[error("argument at offset {offset} fails {condition:?} rule")]
    ArgumentRule {
        /// Offset of the argument
        offset: u64,
        /// Failed condition
        condition: ParamCondition,
    },
}

#[cfg(test)]
mod tests {
    use alloy_primitives::{address, Bytes};
    use minter_contracts::vehicle::{AttributeInfoPair, IVehicleId};

    use super::*;

    const TARGET: Address = address!("5eAA326fB2fc97fAcCe6A79A304876daD0F2e96c");

    fn mint_call(to: Address) -> Call {
        let data = IVehicleId::mintVehicleWithDeviceDefinitionCall {
            manufacturerNode: U256::from(19),
            owner: address!("d744468B9192301650f8Cb5e390BdD824DFA6Dd9"),
            deviceDefinitionId: "cadillac_lyriq_2023".to_string(),
            attrInfo: vec![AttributeInfoPair {
                attribute: "Make".to_string(),
                info: "Cadillac".to_string(),
            }],
        }
        .abi_encode();
        Call::new(to, data.into())
    }

    fn mint_policy() -> CallPolicy {
        CallPolicy::new(
            CallPolicyVersion::V0_0_2,
            vec![Permission::for_function::<
                IVehicleId::mintVehicleWithDeviceDefinitionCall,
            >(TARGET)],
        )
        .unwrap()
    }

    #[test]
    fn test_allows_permitted_call() {
        assert_eq!(mint_policy().check_call(&mint_call(TARGET)), Ok(()));
    }

    #[test]
    fn test_rejects_other_contract() {
        let other = address!("0000000000000000000000000000000000000001");
        let err = mint_policy().check_call(&mint_call(other)).unwrap_err();
        assert!(matches!(err, PolicyViolation::NotPermitted { target, .. } if target == other));
    }

    #[test]
    fn test_rejects_other_function() {
        let call = Call::new(TARGET, Bytes::from(vec![0xa9, 0x05, 0x9c, 0xbb, 0, 0]));
        let err = mint_policy().check_call(&call).unwrap_err();
        assert_eq!(
            err,
            PolicyViolation::NotPermitted {
                target: TARGET,
                selector: Some(FixedBytes::from([0xa9, 0x05, 0x9c, 0xbb])),
            }
        );
    }

    #[test]
    fn test_rejects_empty_call_data() {
        let err = mint_policy()
            .check_call(&Call::new(TARGET, Bytes::new()))
            .unwrap_err();
        assert!(matches!(
            err,
            PolicyViolation::NotPermitted { selector: None, .. }
        ));
    }

    #[test]
    fn test_rejects_value() {
        let mut call = mint_call(TARGET);
        call.value = U256::from(1);
        let err = mint_policy().check_call(&call).unwrap_err();
        assert!(matches!(err, PolicyViolation::ValueLimitExceeded { .. }));
    }

    #[test]
    fn test_argument_rules() {
        let node = B256::from(U256::from(19));
        let policy = CallPolicy::new(
            CallPolicyVersion::V0_0_2,
            vec![
                Permission::for_function::<IVehicleId::mintVehicleWithDeviceDefinitionCall>(
                    TARGET,
                )
                .with_rule(ParamRule::for_argument(0, ParamCondition::Equal, vec![node])),
            ],
        )
        .unwrap();
        assert_eq!(policy.check_call(&mint_call(TARGET)), Ok(()));

        let policy = CallPolicy::new(
            CallPolicyVersion::V0_0_2,
            vec![
                Permission::for_function::<IVehicleId::mintVehicleWithDeviceDefinitionCall>(
                    TARGET,
                )
                .with_rule(ParamRule::for_argument(
                    0,
                    ParamCondition::GreaterThan,
                    vec![node],
                )),
            ],
        )
        .unwrap();
        assert_eq!(
            policy.check_call(&mint_call(TARGET)),
            Err(PolicyViolation::ArgumentRule {
                offset: 0,
                condition: ParamCondition::GreaterThan
            })
        );

        let one_of = ParamRule::for_argument(
            0,
            ParamCondition::OneOf,
            vec![B256::from(U256::from(1)), node],
        );
        assert!(one_of.check(&mint_call(TARGET).data));
    }

    #[test]
    fn test_out_of_range_offsets_fail() {
        let node = B256::from(U256::from(19));
        for rule in [
            ParamRule {
                condition: ParamCondition::Equal,
                offset: u64::MAX,
                params: vec![node],
            },
            ParamRule {
                condition: ParamCondition::NotEqual,
                offset: u64::MAX - 3,
                params: vec![node],
            },
            ParamRule::for_argument(u64::MAX, ParamCondition::NotEqual, vec![node]),
            ParamRule::for_argument(1_000, ParamCondition::NotEqual, vec![node]),
        ] {
            let offset = rule.offset;
            let policy = CallPolicy::new(
                CallPolicyVersion::V0_0_2,
                vec![Permission::for_function::<
                    IVehicleId::mintVehicleWithDeviceDefinitionCall,
                >(TARGET)
                .with_rule(rule)],
            )
            .unwrap();
            assert!(
                matches!(
                    policy.check_call(&mint_call(TARGET)),
                    Err(PolicyViolation::ArgumentRule { offset: o, .. }) if o == offset
                ),
                "offset {offset} should fail"
            );
        }
        assert_eq!(
            ParamRule::for_argument(u64::MAX, ParamCondition::Equal, vec![node]).offset,
            u64::MAX
        );
    }

    #[test]
    fn test_invalid_policies() {
        assert_eq!(
            CallPolicy::new(CallPolicyVersion::V0_0_2, vec![]),
            Err(PolicyError::NoPermissions)
        );

        let mut zero = Permission::for_function::<IVehicleId::mintVehicleWithDeviceDefinitionCall>(
            TARGET,
        );
        zero.selector = FixedBytes::ZERO;
        assert_eq!(
            CallPolicy::new(CallPolicyVersion::V0_0_2, vec![zero]),
            Err(PolicyError::ZeroSelector(TARGET))
        );
    }

    #[test]
    fn test_policy_data_roundtrips() {
        let policy = mint_policy();
        let decoded =
            <Vec<contracts::Permission>>::abi_decode(&policy.policy_data(), true).unwrap();
        assert_eq!(decoded.len(), 1);
        assert_eq!(decoded[0].target, TARGET);
        assert_eq!(
            decoded[0].selector.0,
            IVehicleId::mintVehicleWithDeviceDefinitionCall::SELECTOR
        );
    }
}
