use burn::tensor::{backend::Backend, Data, ElementConversion, Int, Shape, Tensor};

/// Stack already padded token sequences into a `[batch_size, seq_length]` tensor
pub fn sequences_to_tensor<B: Backend>(
    sequences: &[Vec<usize>],
    seq_length: usize,
    device: &B::Device,
) -> Tensor<B, 2, Int> {
    let batch_size = sequences.len();

    let values = sequences
        .iter()
        .flat_map(|tokens| {
            debug_assert_eq!(tokens.len(), seq_length, "sequence is not padded");
            tokens.iter().map(|token| (*token as i64).elem())
        })
        .collect();

    Tensor::from_data(
        Data::new(values, Shape::new([batch_size, seq_length])),
        device,
    )
}

/// Collect integer class labels into a `[batch_size]` tensor
pub fn labels_to_tensor<B: Backend>(labels: &[u8], device: &B::Device) -> Tensor<B, 1, Int> {
    let values = labels.iter().map(|label| (*label as i64).elem()).collect();

    Tensor::from_data(Data::new(values, Shape::new([labels.len()])), device)
}

/// Lift a row-major `f32` matrix into a `[rows, cols]` float tensor
pub fn matrix_to_tensor<B: Backend>(
    values: &[f32],
    rows: usize,
    cols: usize,
    device: &B::Device,
) -> Tensor<B, 2> {
    let values = values.iter().map(|value| value.elem()).collect();

    Tensor::from_data(Data::new(values, Shape::new([rows, cols])), device)
}

#[cfg(test)]
mod tests {
    use burn::backend::NdArray;
    use pretty_assertions::assert_eq;

    use super::*;

    type B = NdArray;

    #[test]
    fn stacks_sequences_row_by_row() {
        let device = Default::default();
        let sequences = vec![vec![0, 2, 1], vec![3, 4, 1]];

        let tensor = sequences_to_tensor::<B>(&sequences, 3, &device);

        assert_eq!(tensor.dims(), [2, 3]);
        assert_eq!(
            tensor.into_data().convert::<i64>().value,
            vec![0, 2, 1, 3, 4, 1]
        );
    }

    #[test]
    fn builds_label_vector() {
        let device = Default::default();

        let tensor = labels_to_tensor::<B>(&[1, 0, 1], &device);

        assert_eq!(tensor.into_data().convert::<i64>().value, vec![1, 0, 1]);
    }

    #[test]
    fn keeps_matrix_layout() {
        let device = Default::default();

        let tensor = matrix_to_tensor::<B>(&[0.0, 0.0, 1.5, -2.0], 2, 2, &device);

        assert_eq!(tensor.dims(), [2, 2]);
        assert_eq!(
            tensor.into_data().convert::<f32>().value,
            vec![0.0, 0.0, 1.5, -2.0]
        );
    }
}
