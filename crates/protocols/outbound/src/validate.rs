//! Destination and aggregator validation for outbound delivery

use swapline_core::{Address, Asset, Version};

use crate::aggregator::fetch_aggregator;
use crate::constants::AggregatorContract;
use crate::OutboundError;

/// Validate a destination address for delivering `target`.
///
/// Synthetics are delivered on the base chain. Performs basic format checks
/// (prefix, length), not full cryptographic validation.
pub fn validate_destination(destination: &Address, target: &Asset) -> Result<(), OutboundError> {
    if destination.is_empty() {
        return Err(OutboundError::EmptyDestination);
    }
    let chain = target.delivery_chain();
    if !destination.is_chain(&chain) {
        return Err(OutboundError::InvalidDestination {
            address: destination.to_string(),
            chain: chain.to_string(),
        });
    }
    Ok(())
}

/// Validate a swap-out through a DEX aggregator.
///
/// The aggregator target address is opaque here: it only has to be present.
pub fn validate_aggregator(
    version: &Version,
    dex_disabled: bool,
    aggregator: &str,
    target_address: &str,
    target_asset: &Asset,
) -> Result<AggregatorContract, OutboundError> {
    if dex_disabled {
        return Err(OutboundError::DexDisabled);
    }
    let contract = fetch_aggregator(version, &target_asset.chain, aggregator)?;
    if !target_asset.is_gas_asset() {
        return Err(OutboundError::NotGasAsset(target_asset.clone()));
    }
    if target_address.is_empty() {
        return Err(OutboundError::EmptyAggregatorTarget);
    }
    Ok(contract)
}

#[cfg(test)]
mod tests {
    use super::*;

    const ETH_ADDR: &str = "0x742d35Cc6634C0532925a3b844Bc9e7595f2bD08";

    fn eth() -> Asset {
        Asset::new("ETH.ETH").unwrap()
    }

    #[test]
    fn test_validate_destination() {
        assert!(validate_destination(&Address::new(ETH_ADDR), &eth()).is_ok());
        assert_eq!(
            validate_destination(&Address::default(), &eth()),
            Err(OutboundError::EmptyDestination)
        );
        let err = validate_destination(&Address::new("bnb1xyz"), &eth()).unwrap_err();
        assert_eq!(err.error_code(), "invalid_destination");
    }

    #[test]
    fn test_synth_destination_is_base_chain() {
        let synth = eth().synthetic();
        assert!(validate_destination(&Address::new(ETH_ADDR), &synth).is_err());
        let maya = Address::new("maya1x0jkvqdh2hlpeztd5zyyk70n3efx6mhudkmnn2");
        assert!(validate_destination(&maya, &synth).is_ok());
    }

    #[test]
    fn test_validate_aggregator_happy_path() {
        let v = Version::new(1, 95, 0);
        let contract = validate_aggregator(&v, false, "2f2386f3848", "whatever", &eth()).unwrap();
        assert_eq!(contract.address, "0x69800327b38A4CeF30367Dec3f64c2f2386f3848");
    }

    #[test]
    fn test_validate_aggregator_rejections() {
        let v = Version::new(1, 95, 0);
        let err = validate_aggregator(&v, true, "2f2386f3848", ETH_ADDR, &eth()).unwrap_err();
        assert_eq!(err.to_string(), "swap out dex integration disabled");

        let err = validate_aggregator(&v, false, "whatever", ETH_ADDR, &eth()).unwrap_err();
        assert_eq!(err.to_string(), "whatever aggregator not found");

        let aave = Asset::new("ETH.AAVE-0X7FC66500C84A76AD7E9C93437BFC5AC33E2DDAE9").unwrap();
        let err = validate_aggregator(&v, false, "2f2386f3848", ETH_ADDR, &aave).unwrap_err();
        assert_eq!(
            err.to_string(),
            "target asset (ETH.AAVE-0X7FC66500C84A76AD7E9C93437BFC5AC33E2DDAE9) is not gas asset, can't use dex feature"
        );

        let err = validate_aggregator(&v, false, "2f2386f3848", "", &eth()).unwrap_err();
        assert_eq!(err.to_string(), "aggregator target asset address is empty");
    }
}
