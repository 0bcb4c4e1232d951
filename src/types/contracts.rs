//! Pinned Safe v1.3.0 contract interfaces.

use alloy::sol;

sol! {
    /// The complete external interface of the v1.3.0 Safe singleton.
    ///
    /// The policy validator treats a self-call as Safe management iff its
    /// selector appears in this interface. The L2 singleton only adds events
    /// on top of this interface, so one pinned declaration covers both
    /// official singletons.
    #[derive(Debug, PartialEq, Eq)]
    interface ISafe {
        function setup(
            address[] _owners,
            uint256 _threshold,
            address to,
            bytes data,
            address fallbackHandler,
            address paymentToken,
            uint256 payment,
            address paymentReceiver
        ) external;

        function execTransaction(
            address to,
            uint256 value,
            bytes data,
            uint8 operation,
            uint256 safeTxGas,
            uint256 baseGas,
            uint256 gasPrice,
            address gasToken,
            address refundReceiver,
            bytes signatures
        ) external payable returns (bool success);

        function requiredTxGas(address to, uint256 value, bytes data, uint8 operation) external returns (uint256);
        function approveHash(bytes32 hashToApprove) external;
        function checkSignatures(bytes32 dataHash, bytes data, bytes signatures) external view;
        function checkNSignatures(bytes32 dataHash, bytes data, bytes signatures, uint256 requiredSignatures) external view;
        function domainSeparator() external view returns (bytes32);
        function encodeTransactionData(
            address to,
            uint256 value,
            bytes data,
            uint8 operation,
            uint256 safeTxGas,
            uint256 baseGas,
            uint256 gasPrice,
            address gasToken,
            address refundReceiver,
            uint256 _nonce
        ) external view returns (bytes memory);
        function getTransactionHash(
            address to,
            uint256 value,
            bytes data,
            uint8 operation,
            uint256 safeTxGas,
            uint256 baseGas,
            uint256 gasPrice,
            address gasToken,
            address refundReceiver,
            uint256 _nonce
        ) external view returns (bytes32);
        function getChainId() external view returns (uint256);
        function nonce() external view returns (uint256);
        function signedMessages(bytes32) external view returns (uint256);
        function approvedHashes(address, bytes32) external view returns (uint256);
        function VERSION() external view returns (string memory);

        function enableModule(address module) external;
        function disableModule(address prevModule, address module) external;
        function execTransactionFromModule(address to, uint256 value, bytes data, uint8 operation) external returns (bool);
        function execTransactionFromModuleReturnData(address to, uint256 value, bytes data, uint8 operation) external returns (bool, bytes memory);
        function isModuleEnabled(address module) external view returns (bool);
        function getModulesPaginated(address start, uint256 pageSize) external view returns (address[] memory, address);

        function addOwnerWithThreshold(address owner, uint256 _threshold) external;
        function removeOwner(address prevOwner, address owner, uint256 _threshold) external;
        function swapOwner(address prevOwner, address oldOwner, address newOwner) external;
        function changeThreshold(uint256 _threshold) external;
        function getThreshold() external view returns (uint256);
        function isOwner(address owner) external view returns (bool);
        function getOwners() external view returns (address[] memory);

        function setFallbackHandler(address handler) external;
        function setGuard(address guard) external;

        function getStorageAt(uint256 offset, uint256 length) external view returns (bytes memory);
        function simulateAndRevert(address targetContract, bytes calldataPayload) external;
    }

    /// The v1.3.0 Safe proxy factory.
    #[derive(Debug, PartialEq, Eq)]
    interface IProxyFactory {
        function createProxyWithNonce(
            address _singleton,
            bytes initializer,
            uint256 saltNonce
        ) external returns (address proxy);
    }

    /// The v1.3.0 multi-send batching library.
    #[derive(Debug, PartialEq, Eq)]
    interface IMultiSend {
        function multiSend(bytes transactions) external payable;
    }

    /// ERC-20, only the piece the policy inspects.
    #[derive(Debug, PartialEq, Eq)]
    interface IERC20 {
        function transfer(address to, uint256 amount) external returns (bool);
    }
}
