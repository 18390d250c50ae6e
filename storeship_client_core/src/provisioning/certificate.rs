//! Serial-number derivation from PKCS#12 credential blobs

use x509_certificate::X509Certificate;

use crate::error::{Result, ValidationError};

/// Derive the signing certificate's serial number from a PKCS#12 blob
///
/// Opens the container with the given password, takes the first certificate
/// bag, and formats its serial as uppercase hex without leading zero bytes,
/// matching how the store reports serial numbers.
pub fn find_p12_serial_number(p12_data: &[u8], password: &str) -> Result<String> {
    let pfx = p12::PFX::parse(p12_data).map_err(|e| {
        ValidationError::invalid_credential(format!("failed to parse PKCS#12 blob: {e:?}"))
    })?;

    let certs = pfx.cert_x509_bags(password).map_err(|e| {
        ValidationError::invalid_credential(format!(
            "failed to open PKCS#12 certificate bags (wrong password?): {e:?}"
        ))
    })?;

    let cert_der = certs.first().ok_or_else(|| {
        ValidationError::invalid_credential("PKCS#12 blob contains no certificate")
    })?;

    let certificate = X509Certificate::from_der(cert_der).map_err(|e| {
        ValidationError::invalid_credential(format!("failed to parse certificate DER: {e}"))
    })?;

    Ok(format_serial(certificate.serial_number_asn1().as_slice()))
}

fn format_serial(bytes: &[u8]) -> String {
    // DER integers are signed; a leading zero byte is padding, not value
    let significant = match bytes {
        [0, rest @ ..] if !rest.is_empty() => rest,
        other => other,
    };
    let mut out = String::with_capacity(significant.len() * 2);
    for byte in significant {
        out.push_str(&format!("{byte:02X}"));
    }
    out
}
