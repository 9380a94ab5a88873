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

use std::time::Duration;

use alloy_primitives::{Bytes, B256};
use minter_contracts::{entry_point::IEntryPoint, kernel::IKernel};
use minter_provider::{BundlerProvider, EvmProvider, PaymasterProvider, SponsorshipContext};
use minter_types::{Call, UserOperation, UserOperationReceipt};
use minter_utils::{
    log::LogOnError,
    poll::{poll_until, PollError, PollOpts},
};
use tracing::{debug, warn};

use crate::{
    contract,
    validator::{KernelValidator, PermissionValidator},
    AccountError, AccountResult, KernelAccount,
};

/// Which validator signs a user operation
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ValidatorSelection {
    /// The root validator, unrestricted
    Sudo,
    /// The regular (permission) validator, restricted by its policies
    Regular,
}

/// Enable mode context of an operation installing the regular validator
#[derive(Clone, Copy, Debug)]
struct Enable {
    nonce: u32,
}

/// Client sending sponsored user operations for a [`KernelAccount`]
#[derive(Debug)]
pub struct KernelAccountClient<E, B, P> {
    account: KernelAccount,
    evm: E,
    bundler: B,
    paymaster: P,
}

impl<E, B, P> KernelAccountClient<E, B, P>
where
    E: EvmProvider,
    B: BundlerProvider,
    P: PaymasterProvider,
{
    /// Create a new client. Every operation it sends is sponsored by `paymaster`.
    pub fn new(account: KernelAccount, evm: E, bundler: B, paymaster: P) -> Self {
        Self {
            account,
            evm,
            bundler,
            paymaster,
        }
    }

    /// The account operations are sent for
    pub fn account(&self) -> &KernelAccount {
        &self.account
    }

    /// Whether the account has been deployed
    pub async fn is_deployed(&self) -> AccountResult<bool> {
        let code = self
            .evm
            .get_code(self.account.address())
            .await
            .map_err(AccountError::Prepare)?;
        Ok(!code.is_empty())
    }

    /// Fill, sponsor, sign and submit a user operation executing `calls`.
    ///
    /// Calls signed by the regular validator are checked against its
    /// policies before anything is sent. Returns the hash assigned by the bundler.
    pub async fn send_user_operation(
        &self,
        calls: &[Call],
        selection: ValidatorSelection,
    ) -> AccountResult<B256> {
        if selection == ValidatorSelection::Regular {
            let regular = self.regular()?;
            for call in calls {
                regular.check_call(call)?;
            }
        }
        let call_data = self.account.encode_calls(calls)?;
        self.ensure_entry_point_supported().await?;

        let (mut uo, enable) = self.prepare_user_operation(call_data, selection).await?;
        let hash = uo.hash(self.account.entry_point(), self.account.chain_id());
        uo.signature = self.sign(&hash, selection, enable)?;

        let bundler_hash = self
            .bundler
            .send_user_operation(&uo, self.account.entry_point())
            .await
            .log_on_error("bundler rejected user operation")
            .map_err(AccountError::Submission)?;
        if bundler_hash != hash {
            warn!("Bundler returned hash {bundler_hash}, computed {hash}");
        }
        Ok(bundler_hash)
    }

    /// Wait for the receipt of a user operation.
    ///
    /// Polls every `poll_interval` and gives up once `timeout` has elapsed.
    pub async fn wait_for_user_operation_receipt(
        &self,
        hash: B256,
        timeout: Duration,
        poll_interval: Duration,
    ) -> AccountResult<UserOperationReceipt> {
        let bundler = &self.bundler;
        poll_until(
            "user operation receipt",
            move || bundler.get_user_operation_receipt(hash),
            PollOpts {
                interval: poll_interval,
                timeout,
            },
        )
        .await
        .map_err(|e| match e {
            PollError::Timeout => AccountError::ReceiptTimeout { hash, timeout },
            PollError::Failed(e) => AccountError::Receipt(e),
        })
    }

    fn regular(&self) -> AccountResult<&PermissionValidator> {
        self.account.regular().ok_or_else(|| {
            AccountError::Validator("account has no regular validator".to_string())
        })
    }

    async fn ensure_entry_point_supported(&self) -> AccountResult<()> {
        let entry_point = self.account.entry_point();
        let supported = self
            .bundler
            .supported_entry_points()
            .await
            .map_err(AccountError::Submission)?;
        if !supported.contains(&entry_point) {
            return Err(AccountError::UnsupportedEntryPoint(entry_point));
        }
        Ok(())
    }

    async fn prepare_user_operation(
        &self,
        call_data: Bytes,
        selection: ValidatorSelection,
    ) -> AccountResult<(UserOperation, Option<Enable>)> {
        let address = self.account.address();
        let deployed = self.is_deployed().await?;

        let (nonce_key, enable) = match selection {
            ValidatorSelection::Sudo => (self.account.sudo_nonce_key(), None),
            ValidatorSelection::Regular => {
                let regular = self.regular()?;
                let enable = self.enable_context(regular, deployed).await?;
                (
                    self.account.regular_nonce_key(regular, enable.is_some()),
                    enable,
                )
            }
        };

        let nonce = contract::read(
            &self.evm,
            self.account.entry_point(),
            IEntryPoint::getNonceCall {
                sender: address,
                key: nonce_key,
            },
        )
        .await
        .map_err(AccountError::Prepare)?
        .nonce;

        let (factory, factory_data) = if deployed {
            (None, Bytes::new())
        } else {
            let (factory, data) = self.account.factory_call();
            (Some(factory), data)
        };

        let fees = self
            .evm
            .estimate_fees()
            .await
            .map_err(AccountError::Prepare)?;

        let mut uo = UserOperation {
            sender: address,
            nonce,
            factory,
            factory_data,
            call_data,
            ..Default::default()
        };
        uo.set_gas_fees(fees);
        uo.signature = self.dummy_signature(selection, enable)?;

        let sponsorship = self
            .paymaster
            .sponsor_user_operation(
                &uo,
                SponsorshipContext {
                    chain_id: self.account.chain_id(),
                    entry_point: self.account.entry_point(),
                },
            )
            .await
            .log_on_error("paymaster refused to sponsor user operation")
            .map_err(AccountError::Sponsorship)?;
        debug!(
            "Sponsored by paymaster {}, call gas {}, verification gas {}",
            sponsorship.paymaster, sponsorship.call_gas_limit, sponsorship.verification_gas_limit
        );
        sponsorship.apply(&mut uo);

        Ok((uo, enable))
    }

    /// `None` if the regular validator is installed already
    async fn enable_context(
        &self,
        regular: &PermissionValidator,
        deployed: bool,
    ) -> AccountResult<Option<Enable>> {
        if !deployed {
            // initialize sets the first enable nonce
            return Ok(Some(Enable { nonce: 1 }));
        }

        let address = self.account.address();
        let config = contract::read(
            &self.evm,
            address,
            IKernel::validationConfigCall {
                vId: regular.validation_id(),
            },
        )
        .await
        .map_err(AccountError::Prepare)?
        ._0;
        if !config.hook.is_zero() {
            return Ok(None);
        }

        let nonce = contract::read(&self.evm, address, IKernel::currentNonceCall {})
            .await
            .map_err(AccountError::Prepare)?
            ._0;
        Ok(Some(Enable { nonce }))
    }

    fn dummy_signature(
        &self,
        selection: ValidatorSelection,
        enable: Option<Enable>,
    ) -> AccountResult<Bytes> {
        Ok(match selection {
            ValidatorSelection::Sudo => self.account.sudo().dummy_signature(),
            ValidatorSelection::Regular => {
                let regular = self.regular()?;
                match enable {
                    None => regular.dummy_signature(),
                    Some(enable) => self.account.encode_enable_signature(
                        regular,
                        enable.nonce,
                        self.account.sudo().dummy_signature(),
                        regular.dummy_signature(),
                    ),
                }
            }
        })
    }

    fn sign(
        &self,
        hash: &B256,
        selection: ValidatorSelection,
        enable: Option<Enable>,
    ) -> AccountResult<Bytes> {
        match selection {
            ValidatorSelection::Sudo => self.account.sudo().sign_user_operation_hash(hash),
            ValidatorSelection::Regular => {
                let regular = self.regular()?;
                let signature = regular.sign_user_operation_hash(hash)?;
                let Some(enable) = enable else {
                    return Ok(signature);
                };
                let enable_hash = self.account.enable_hash(regular, enable.nonce);
                let enable_signature = self.account.sudo().sign_hash(&enable_hash)?;
                Ok(self.account.encode_enable_signature(
                    regular,
                    enable.nonce,
                    enable_signature,
                    signature,
                ))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{
        atomic::{AtomicUsize, Ordering},
        Arc, Mutex,
    };

    use alloy_primitives::{address, b256, bytes, Address, Signature, U256};
    use alloy_sol_types::{SolCall, SolValue};
    use minter_contracts::{
        kernel::{IKernelFactory, ValidationConfig},
        vehicle::IVehicleId,
    };
    use minter_provider::{
        MockBundlerProvider, MockEvmProvider, MockPaymasterProvider, ProviderError,
    };
    use minter_signer::LocalSigner;
    use minter_types::{
        chain::ChainSpec,
        kernel::KernelVersion,
        policy::{CallPolicy, CallPolicyVersion, PolicyViolation, Permission},
        GasFees, SponsorshipData,
    };

    use super::*;
    use crate::{EcdsaValidator, PermissionValidator};

    const ACCOUNT: Address = address!("00000000000000000000000000000000000000aa");
    const TARGET: Address = address!("5eAA326fB2fc97fAcCe6A79A304876daD0F2e96c");
    const PAYMASTER: Address = address!("0000000000000000000000000000000000000777");

    fn amoy() -> ChainSpec {
        ChainSpec {
            id: 80002,
            ..Default::default()
        }
    }

    fn entry_point() -> Address {
        amoy().entry_point_address
    }

    /// Chain where the account is deployed iff `deployed`, with the regular
    /// validator installed iff `installed`
    fn evm(deployed: bool, installed: bool) -> MockEvmProvider {
        let mut evm = MockEvmProvider::default();
        evm.expect_get_chain_id().returning(|| Ok(80002));
        evm.expect_get_code().returning(move |_| {
            Ok(if deployed {
                bytes!("6080")
            } else {
                Bytes::new()
            })
        });
        evm.expect_estimate_fees().returning(|| {
            Ok(GasFees {
                max_fee_per_gas: 100,
                max_priority_fee_per_gas: 10,
            })
        });
        evm.expect_call().returning(move |_, data| {
            let selector: [u8; 4] = data[..4].try_into().unwrap();
            let out = match selector {
                IKernelFactory::getAddressCall::SELECTOR => {
                    IKernelFactory::getAddressCall::abi_encode_returns(&(ACCOUNT,))
                }
                IEntryPoint::getNonceCall::SELECTOR => {
                    IEntryPoint::getNonceCall::abi_encode_returns(&(U256::from(7),))
                }
                IKernel::validationConfigCall::SELECTOR => ValidationConfig {
                    nonce: 1,
                    hook: if installed {
                        address!("0000000000000000000000000000000000000001")
                    } else {
                        Address::ZERO
                    },
                }
                .abi_encode(),
                IKernel::currentNonceCall::SELECTOR => {
                    IKernel::currentNonceCall::abi_encode_returns(&(3_u32,))
                }
                _ => panic!("unexpected call {data}"),
            };
            Ok(out.into())
        });
        evm
    }

    fn sponsorship() -> SponsorshipData {
        SponsorshipData {
            paymaster: PAYMASTER,
            paymaster_data: bytes!("beef"),
            paymaster_verification_gas_limit: 50_000,
            paymaster_post_op_gas_limit: 1,
            call_gas_limit: 70_000,
            verification_gas_limit: 300_000,
            pre_verification_gas: 60_000,
            gas_fees: None,
        }
    }

    fn paymaster() -> MockPaymasterProvider {
        let mut paymaster = MockPaymasterProvider::default();
        paymaster
            .expect_sponsor_user_operation()
            .times(1)
            .returning(|uo, context| {
                assert_eq!(context.chain_id, 80002);
                assert_eq!(uo.paymaster, None);
                assert!(!uo.signature.is_empty());
                Ok(sponsorship())
            });
        paymaster
    }

    /// Bundler accepting one operation, storing it in `sent`
    fn bundler(sent: Arc<Mutex<Option<UserOperation>>>) -> MockBundlerProvider {
        let mut bundler = MockBundlerProvider::default();
        bundler
            .expect_supported_entry_points()
            .returning(|| Ok(vec![entry_point()]));
        bundler
            .expect_send_user_operation()
            .times(1)
            .returning(move |uo, ep| {
                assert_eq!(ep, entry_point());
                let hash = uo.hash(ep, 80002);
                *sent.lock().unwrap() = Some(uo.clone());
                Ok(hash)
            });
        bundler
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

    fn mint_call(to: Address) -> Call {
        let data = IVehicleId::mintVehicleWithDeviceDefinitionCall {
            manufacturerNode: U256::from(19),
            owner: address!("d744468B9192301650f8Cb5e390BdD824DFA6Dd9"),
            deviceDefinitionId: "cadillac_lyriq_2023".to_string(),
            attrInfo: vec![],
        }
        .abi_encode();
        Call::new(to, data.into())
    }

    struct Fixture {
        sudo: Address,
        worker: Address,
        client: KernelAccountClient<MockEvmProvider, MockBundlerProvider, MockPaymasterProvider>,
    }

    async fn fixture(
        evm: MockEvmProvider,
        bundler: MockBundlerProvider,
        paymaster: MockPaymasterProvider,
    ) -> Fixture {
        let chain_spec = amoy();
        let sudo_signer = LocalSigner::random();
        let worker_signer = LocalSigner::random();
        let (sudo, worker) = (sudo_signer.address(), worker_signer.address());

        let sudo_validator =
            EcdsaValidator::new(&evm, &chain_spec, sudo_signer, KernelVersion::V3_1)
                .await
                .unwrap();
        let worker_validator = PermissionValidator::new(
            &evm,
            &chain_spec,
            worker_signer,
            vec![mint_policy()],
            KernelVersion::V3_1,
        )
        .await
        .unwrap();
        let account = KernelAccount::new(
            &evm,
            &chain_spec,
            KernelVersion::V3_1,
            sudo_validator,
            Some(worker_validator),
            0,
        )
        .await
        .unwrap();

        Fixture {
            sudo,
            worker,
            client: KernelAccountClient::new(account, evm, bundler, paymaster),
        }
    }

    fn recover(signature: &[u8], hash: &B256) -> Address {
        Signature::try_from(signature)
            .unwrap()
            .recover_address_from_msg(hash.as_slice())
            .unwrap()
    }

    #[tokio::test]
    async fn test_send_sudo_deploys_account() {
        let sent = Arc::new(Mutex::new(None));
        let f = fixture(evm(false, false), bundler(sent.clone()), paymaster()).await;

        let call = Call::new(Address::ZERO, Bytes::new());
        let hash = f
            .client
            .send_user_operation(&[call], ValidatorSelection::Sudo)
            .await
            .unwrap();

        let uo = sent.lock().unwrap().clone().unwrap();
        assert_eq!(uo.hash(entry_point(), 80002), hash);
        assert_eq!(uo.sender, ACCOUNT);
        assert_eq!(uo.nonce, U256::from(7));
        assert_eq!(uo.factory, Some(KernelVersion::V3_1.addresses().meta_factory));
        assert!(!uo.factory_data.is_empty());
        assert_eq!(uo.paymaster, Some(PAYMASTER));
        assert_eq!(uo.call_gas_limit, 70_000);
        assert_eq!(uo.max_fee_per_gas, 100);
        assert_eq!(recover(&uo.signature, &hash), f.sudo);
    }

    #[tokio::test]
    async fn test_send_regular_enables_validator() {
        let sent = Arc::new(Mutex::new(None));
        let f = fixture(evm(false, false), bundler(sent.clone()), paymaster()).await;

        let hash = f
            .client
            .send_user_operation(&[mint_call(TARGET)], ValidatorSelection::Regular)
            .await
            .unwrap();

        let uo = sent.lock().unwrap().clone().unwrap();
        let account = f.client.account();
        let regular = account.regular().unwrap();
        assert_eq!(uo.nonce, U256::from(7));

        assert_eq!(&uo.signature[..20], Address::ZERO.as_slice());
        let (_, _, _, enable_sig, user_op_sig) =
            <(Bytes, Bytes, Bytes, Bytes, Bytes)>::abi_decode_params(&uo.signature[20..], true)
                .unwrap();
        assert_eq!(user_op_sig[0], 0xff);
        assert_eq!(recover(&user_op_sig[1..], &hash), f.worker);

        let enable_hash = account.enable_hash(regular, 1);
        let enable_signer = Signature::try_from(&enable_sig[..])
            .unwrap()
            .recover_address_from_prehash(&enable_hash)
            .unwrap();
        assert_eq!(enable_signer, f.sudo);
    }

    #[tokio::test]
    async fn test_send_regular_installed() {
        let sent = Arc::new(Mutex::new(None));
        let f = fixture(evm(true, true), bundler(sent.clone()), paymaster()).await;

        let hash = f
            .client
            .send_user_operation(&[mint_call(TARGET)], ValidatorSelection::Regular)
            .await
            .unwrap();

        let uo = sent.lock().unwrap().clone().unwrap();
        assert_eq!(uo.factory, None);
        assert_eq!(uo.signature.len(), 66);
        assert_eq!(uo.signature[0], 0xff);
        assert_eq!(recover(&uo.signature[1..], &hash), f.worker);
    }

    #[tokio::test]
    async fn test_send_regular_deployed_not_installed() {
        let sent = Arc::new(Mutex::new(None));
        let f = fixture(evm(true, false), bundler(sent.clone()), paymaster()).await;

        f.client
            .send_user_operation(&[mint_call(TARGET)], ValidatorSelection::Regular)
            .await
            .unwrap();

        let uo = sent.lock().unwrap().clone().unwrap();
        let (validator_data, ..) = <(Bytes, Bytes, Bytes, Bytes, Bytes)>::abi_decode_params(
            &uo.signature[20..],
            true,
        )
        .unwrap();
        let regular = f.client.account().regular().unwrap();
        assert_eq!(validator_data, regular.enable_data());
    }

    #[tokio::test]
    async fn test_policy_violation_never_reaches_bundler() {
        let mut bundler = MockBundlerProvider::default();
        bundler.expect_supported_entry_points().never();
        bundler.expect_send_user_operation().never();
        let mut paymaster = MockPaymasterProvider::default();
        paymaster.expect_sponsor_user_operation().never();
        let f = fixture(evm(true, true), bundler, paymaster).await;

        let other_contract = address!("0000000000000000000000000000000000000bad");
        let err = f
            .client
            .send_user_operation(&[mint_call(other_contract)], ValidatorSelection::Regular)
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            AccountError::PolicyViolation(PolicyViolation::NotPermitted { target, .. })
                if target == other_contract
        ));

        let transfer = Call::new(TARGET, bytes!("a9059cbb00000000"));
        let err = f
            .client
            .send_user_operation(&[transfer], ValidatorSelection::Regular)
            .await
            .unwrap_err();
        assert!(matches!(err, AccountError::PolicyViolation(_)));
    }

    #[tokio::test]
    async fn test_sponsorship_failure_aborts() {
        let mut bundler = MockBundlerProvider::default();
        bundler
            .expect_supported_entry_points()
            .returning(|| Ok(vec![entry_point()]));
        bundler.expect_send_user_operation().never();
        let mut paymaster = MockPaymasterProvider::default();
        paymaster
            .expect_sponsor_user_operation()
            .times(1)
            .returning(|_, _| Err(ProviderError::ContractError("project out of credits".into())));
        let f = fixture(evm(true, true), bundler, paymaster).await;

        let err = f
            .client
            .send_user_operation(&[mint_call(TARGET)], ValidatorSelection::Regular)
            .await
            .unwrap_err();
        assert!(matches!(err, AccountError::Sponsorship(_)));
    }

    #[tokio::test]
    async fn test_unsupported_entry_point() {
        let mut bundler = MockBundlerProvider::default();
        bundler
            .expect_supported_entry_points()
            .returning(|| Ok(vec![Address::ZERO]));
        bundler.expect_send_user_operation().never();
        let mut paymaster = MockPaymasterProvider::default();
        paymaster.expect_sponsor_user_operation().never();
        let f = fixture(evm(true, true), bundler, paymaster).await;

        let err = f
            .client
            .send_user_operation(&[mint_call(TARGET)], ValidatorSelection::Sudo)
            .await
            .unwrap_err();
        assert!(matches!(err, AccountError::UnsupportedEntryPoint(ep) if ep == entry_point()));
    }

    #[tokio::test]
    async fn test_bundler_rejection() {
        let mut bundler = MockBundlerProvider::default();
        bundler
            .expect_supported_entry_points()
            .returning(|| Ok(vec![entry_point()]));
        bundler
            .expect_send_user_operation()
            .times(1)
            .returning(|_, _| Err(ProviderError::ContractError("AA21 didn't pay prefund".into())));
        let f = fixture(evm(true, true), bundler, paymaster()).await;

        let err = f
            .client
            .send_user_operation(&[mint_call(TARGET)], ValidatorSelection::Regular)
            .await
            .unwrap_err();
        assert!(matches!(err, AccountError::Submission(_)));
    }

    fn receipt(hash: B256) -> UserOperationReceipt {
        UserOperationReceipt {
            user_op_hash: hash,
            entry_point: entry_point(),
            sender: ACCOUNT,
            success: true,
            ..Default::default()
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_wait_for_receipt() {
        let hash = b256!("0000000000000000000000000000000000000000000000000000000000000abc");
        let polls = Arc::new(AtomicUsize::new(0));
        let counter = polls.clone();
        let mut bundler = MockBundlerProvider::default();
        bundler
            .expect_get_user_operation_receipt()
            .returning(move |h| {
                let n = counter.fetch_add(1, Ordering::SeqCst);
                Ok((n > 0).then(|| receipt(h)))
            });
        let f = fixture(evm(true, true), bundler, MockPaymasterProvider::default()).await;

        let receipt = f
            .client
            .wait_for_user_operation_receipt(hash, Duration::from_secs(15), Duration::from_secs(1))
            .await
            .unwrap();
        assert_eq!(receipt.user_op_hash, hash);
        assert_eq!(polls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_wait_for_receipt_timeout() {
        let hash = b256!("0000000000000000000000000000000000000000000000000000000000000abc");
        let polls = Arc::new(AtomicUsize::new(0));
        let counter = polls.clone();
        let mut bundler = MockBundlerProvider::default();
        bundler
            .expect_get_user_operation_receipt()
            .returning(move |_| {
                counter.fetch_add(1, Ordering::SeqCst);
                Ok(None)
            });
        let f = fixture(evm(true, true), bundler, MockPaymasterProvider::default()).await;

        let timeout = Duration::from_millis(50);
        let err = f
            .client
            .wait_for_user_operation_receipt(hash, timeout, Duration::from_secs(1))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            AccountError::ReceiptTimeout { hash: h, timeout: t } if h == hash && t == timeout
        ));
        assert_eq!(polls.load(Ordering::SeqCst), 1);

        // nothing polls once the deadline has passed
        tokio::time::sleep(Duration::from_secs(5)).await;
        assert_eq!(polls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_receipt_lookup_failure() {
        let mut bundler = MockBundlerProvider::default();
        bundler
            .expect_get_user_operation_receipt()
            .times(1)
            .returning(|_| Err(ProviderError::ContractError("internal error".into())));
        let f = fixture(evm(true, true), bundler, MockPaymasterProvider::default()).await;

        let err = f
            .client
            .wait_for_user_operation_receipt(
                B256::ZERO,
                Duration::from_secs(1),
                Duration::from_millis(10),
            )
            .await
            .unwrap_err();
        assert!(matches!(err, AccountError::Receipt(_)));
    }
}
