use super::model::EmailRecord;
use super::schema::VerifyResult;

/// Fold a verification batch back into the record cache.
///
/// Every record whose `main` address exactly matches a result takes that
/// result's status; everything else is untouched and relative order is
/// preserved. Matching is by address rather than id because the backend
/// echoes only addresses in verification results; an address that matches
/// nothing updates nothing.
pub fn merge_verify_results(records: &mut [EmailRecord], results: &[VerifyResult]) {
    for result in results {
        let mut matched = false;
        for record in records.iter_mut() {
            if record.main == result.email {
                record.status = result.status;
                matched = true;
            }
        }
        if !matched {
            tracing::warn!(address = %result.email, "verification result matched no cached record");
        }
    }
}
