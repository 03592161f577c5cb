//! LayerZero and Safe contract interfaces
//!
//! This module contains the Solidity interface definitions used for wiring.

use alloy::sol;

sol! {
    /// Executor configuration, config type 1.
    #[derive(Debug, PartialEq, Eq)]
    struct ExecutorConfig {
        uint32 maxMessageSize;
        address executor;
    }

    /// ULN configuration structure, config type 2.
    #[derive(Debug, PartialEq, Eq)]
    struct UlnConfig {
        uint64 confirmations;
        uint8 requiredDVNCount;
        uint8 optionalDVNCount;
        uint8 optionalDVNThreshold;
        address[] requiredDVNs;
        address[] optionalDVNs;
    }

    /// A single `setConfig` parameter.
    #[derive(Debug, PartialEq, Eq)]
    struct SetConfigParam {
        uint32 eid;
        uint32 configType;
        bytes config;
    }

    /// Enforced options for a destination and message type.
    #[derive(Debug, PartialEq, Eq)]
    struct EnforcedOptionParam {
        uint32 eid;
        uint16 msgType;
        bytes options;
    }

    /// LayerZero Endpoint V2 interface
    #[sol(rpc)]
    #[derive(Debug)]
    interface ILayerZeroEndpointV2 {
        function defaultSendLibrary(uint32 _eid) external view returns (address);
        function defaultReceiveLibrary(uint32 _eid) external view returns (address);
        function getSendLibrary(address _sender, uint32 _eid) external view returns (address lib);
        function getReceiveLibrary(address _receiver, uint32 _eid) external view returns (address lib, bool isDefault);
        function getConfig(address _oapp, address _lib, uint32 _eid, uint32 _configType) external view returns (bytes memory config);

        function setSendLibrary(address _oapp, uint32 _eid, address _newLib) external;
        function setReceiveLibrary(address _oapp, uint32 _eid, address _newLib, uint256 _gracePeriod) external;
        function setConfig(address _oapp, address _lib, SetConfigParam[] calldata _params) external;
    }

    /// The OApp surface of the omnichain token.
    #[sol(rpc)]
    #[derive(Debug)]
    interface IOApp {
        function endpoint() external view returns (address);
        function owner() external view returns (address);
        function peers(uint32 _eid) external view returns (bytes32);
        function enforcedOptions(uint32 _eid, uint16 _msgType) external view returns (bytes memory);

        function setPeer(uint32 _eid, bytes32 _peer) external;
        function setEnforcedOptions(EnforcedOptionParam[] calldata _enforcedOptions) external;
        function setDelegate(address _delegate) external;
    }

    /// Safe multisig, the subset needed for proposals.
    #[sol(rpc)]
    #[derive(Debug)]
    interface ISafe {
        function nonce() external view returns (uint256);
    }

    /// Safe `MultiSendCallOnly`.
    #[derive(Debug)]
    interface IMultiSend {
        function multiSend(bytes memory transactions) external payable;
    }

    /// The Safe transaction that is hashed with EIP-712 and signed by owners.
    #[derive(Debug, PartialEq, Eq)]
    struct SafeTx {
        address to;
        uint256 value;
        bytes data;
        uint8 operation;
        uint256 safeTxGas;
        uint256 baseGas;
        uint256 gasPrice;
        address gasToken;
        address refundReceiver;
        uint256 nonce;
    }
}
