//! Query expression for the result endpoint's CRUD filter syntax.

/// Builds the filter parameters for a result fetch: one `or` condition per
/// selected layer, OR-ing `layer_name_canonical == value` in the upstream
/// CRUD request wire format (`or=layer_name_canonical||$eq||{value}`).
pub fn layer_filter_params(layers: &[String]) -> Vec<(&'static str, String)> {
    layers
        .iter()
        .map(|layer| ("or", format!("layer_name_canonical||$eq||{layer}")))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn one_condition_per_layer_in_selection_order() {
        let layers = vec!["conv1".to_string(), "fc".to_string()];
        assert_eq!(
            layer_filter_params(&layers),
            vec![
                ("or", "layer_name_canonical||$eq||conv1".to_string()),
                ("or", "layer_name_canonical||$eq||fc".to_string()),
            ]
        );
    }

    #[test]
    fn no_layers_means_no_conditions() {
        assert!(layer_filter_params(&[]).is_empty());
    }
}
