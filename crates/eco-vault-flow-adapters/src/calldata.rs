use alloy::dyn_abi::{DynSolType, DynSolValue, JsonAbiExt};
use alloy::json_abi::Function;
use alloy::primitives::Bytes;

use eco_vault_flow_core::{ContractCall, PortError};

pub fn encode_call(call: &ContractCall) -> Result<Bytes, PortError> {
    let function = Function::parse(&call.function_signature).map_err(|e| {
        PortError::Validation(format!(
            "invalid function signature '{}': {e}",
            call.function_signature
        ))
    })?;
    if function.inputs.len() != call.args.len() {
        return Err(PortError::Validation(format!(
            "argument count mismatch: expected {}, got {}",
            function.inputs.len(),
            call.args.len()
        )));
    }

    let mut values = Vec::with_capacity(call.args.len());
    for (input, arg) in function.inputs.iter().zip(call.args.iter()) {
        let ty: DynSolType = input.ty.parse().map_err(|e| {
            PortError::Validation(format!("unsupported type '{}': {e}", input.ty))
        })?;
        match ty {
            DynSolType::Uint(bits) => {
                if bits < 256 && arg.bit_len() > bits {
                    return Err(PortError::Validation(format!(
                        "argument {arg} overflows uint{bits}"
                    )));
                }
                values.push(DynSolValue::Uint(*arg, bits));
            }
            other => {
                return Err(PortError::Validation(format!(
                    "only uint arguments are supported, got {other:?}"
                )))
            }
        }
    }

    let encoded = function
        .abi_encode_input(&values)
        .map_err(|e| PortError::Validation(format!("abi encoding failed: {e}")))?;
    if encoded.len() < 4 || encoded[0..4] != call.selector() {
        return Err(PortError::Validation("ABI_SELECTOR_MISMATCH".to_owned()));
    }
    Ok(Bytes::from(encoded))
}
